//! Login gate: one masked secret input.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use tradelog_core::AccessState;

use crate::app::AppState;
use crate::theme;
use crate::ui::{centered_rect, TITLE};

const MASK: char = '•';

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(50, 40, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {TITLE} "))
        .title_style(theme::panel_title(true));

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let masked: String = std::iter::repeat(MASK)
        .take(app.login.input.chars().count())
        .collect();

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("Password", theme::muted())),
        Line::from(vec![
            Span::styled("> ", theme::accent()),
            Span::styled(masked, theme::accent_bold()),
            Span::styled("_", theme::accent()),
        ]),
        Line::from(""),
    ];

    if app.session.state() == AccessState::Denied {
        lines.push(Line::from(Span::styled(
            "Password incorrect",
            theme::negative(),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "[Enter] unlock  [Esc] quit",
            theme::muted(),
        )));
    }

    f.render_widget(Paragraph::new(lines), inner);
}
