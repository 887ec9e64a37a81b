//! Sidebar — the "Log a New Trade" entry form.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, Focus};
use crate::theme;

/// Label column width, including the trailing colon.
const LABEL_WIDTH: usize = 12;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let active = app.focus.in_form();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(active))
        .title(" Log a New Trade ")
        .title_style(theme::panel_title(active));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let form = &app.form;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(""));
    field_line(&mut lines, app, Focus::Date, "Date", &form.date, theme::text());
    field_line(&mut lines, app, Focus::Symbol, "Symbol", &form.symbol, theme::text());
    field_line(
        &mut lines,
        app,
        Focus::Direction,
        "Direction",
        &format!("< {} >", form.direction),
        theme::direction(form.direction),
    );
    field_line(&mut lines, app, Focus::Entry, "Entry Price", &form.entry, theme::text());
    field_line(&mut lines, app, Focus::Exit, "Exit Price", &form.exit, theme::text());
    lines.push(Line::from(""));

    // Notes span several lines; only the first carries the label.
    let notes_focused = app.focus == Focus::Notes;
    lines.push(Line::from(Span::styled(
        "Notes / Strategy:",
        label_style(notes_focused),
    )));
    let note_style = if notes_focused {
        theme::focused()
    } else {
        theme::text()
    };
    let mut note_lines: Vec<&str> = form.notes.split('\n').collect();
    if notes_focused {
        // Caret goes on the last line.
        if let Some(last) = note_lines.pop() {
            for line in note_lines {
                lines.push(Line::from(Span::styled(format!("  {line}"), note_style)));
            }
            lines.push(Line::from(vec![
                Span::styled(format!("  {last}"), note_style),
                Span::styled("_", theme::accent()),
            ]));
        }
    } else {
        for line in note_lines {
            lines.push(Line::from(Span::styled(format!("  {line}"), note_style)));
        }
    }
    lines.push(Line::from(""));

    let button_style = if app.focus == Focus::Save {
        theme::focused()
    } else {
        theme::accent_bold()
    };
    lines.push(Line::from(Span::styled("  [ Save Trade ]", button_style)));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(hint(app.focus), theme::muted())));

    f.render_widget(Paragraph::new(lines), inner);
}

fn label_style(focused: bool) -> Style {
    if focused {
        theme::accent_bold()
    } else {
        theme::muted()
    }
}

fn field_line<'a>(
    lines: &mut Vec<Line<'a>>,
    app: &AppState,
    field: Focus,
    label: &str,
    value: &str,
    style: Style,
) {
    let focused = app.focus == field;
    let value_style = if focused { theme::focused() } else { style };
    let mut spans = vec![
        Span::styled(
            format!("{:<width$}", format!("{label}:"), width = LABEL_WIDTH),
            label_style(focused),
        ),
        Span::styled(value.to_string(), value_style),
    ];
    if focused && field != Focus::Direction {
        spans.push(Span::styled("_", theme::accent()));
    }
    lines.push(Line::from(spans));
}

/// Key hints for the focused field.
fn hint(focus: Focus) -> &'static str {
    match focus {
        Focus::Date => "[↑/↓/+/-] day [PgUp/PgDn] week",
        Focus::Direction => "[←/→/Space] toggle [L/S] set",
        Focus::Entry | Focus::Exit => "[↑/↓] ±0.05",
        Focus::Notes => "[Enter] new line",
        Focus::Save => "[Enter] save",
        Focus::Symbol | Focus::Trades => "",
    }
}
