//! Overlay widgets — key help and error history.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

const JOURNAL_KEYS: &[(&str, &str)] = &[
    ("Tab / Shift+Tab", "next / previous field"),
    ("Ctrl+S", "save the trade"),
    ("Up / Down", "date ±1 day, price ±0.05"),
    ("+ / -", "date ±1 day once complete"),
    ("PgUp / PgDn", "date ±1 week"),
    ("Left / Right / Space", "toggle direction"),
    ("Enter", "next field, new line in notes"),
    ("j / k, Home / End", "scroll recent trades"),
    ("r", "reload the journal file"),
];

const GLOBAL_KEYS: &[(&str, &str)] = &[
    ("F1", "this help"),
    ("F2", "error history"),
    ("Ctrl+Q / Ctrl+C", "quit"),
];

/// Key reference overlay.
pub fn render_help(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(70, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Help [Esc]close ")
        .title_style(theme::accent_bold());

    let mut lines: Vec<Line> = Vec::new();
    if app.is_unlocked() {
        lines.push(Line::from(Span::styled("Journal", theme::accent_bold())));
        key_lines(&mut lines, JOURNAL_KEYS);
    } else {
        lines.push(Line::from(Span::styled("Login", theme::accent_bold())));
        key_lines(&mut lines, &[("Enter", "unlock"), ("Esc", "quit")]);
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Anywhere", theme::accent_bold())));
    key_lines(&mut lines, GLOBAL_KEYS);

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(para, popup);
}

fn key_lines(lines: &mut Vec<Line<'static>>, keys: &[(&'static str, &'static str)]) {
    for (key, action) in keys {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:>22}  "), theme::accent()),
            Span::styled(*action, theme::muted()),
        ]));
    }
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let visible_height = inner.height as usize;
    let mut lines: Vec<Line> = Vec::new();
    for (i, err) in app.error_history.iter().enumerate().skip(app.error_scroll) {
        if lines.len() >= visible_height {
            break;
        }
        let style = if i == app.error_scroll {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(format!("[{}] ", err.category), theme::warning()),
            Span::styled(err.message.as_str(), style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(err.context.as_str(), theme::muted()),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use crate::app::Overlay;
    use crate::test_helpers::{journal_app, render_to_string, unlocked_app};

    #[test]
    fn help_lists_journal_keys_once_unlocked() {
        let (_dir, mut app) = unlocked_app();
        app.overlay = Overlay::Help;
        let screen = render_to_string(&app, 120, 34);
        assert!(screen.contains("Ctrl+S"));
        assert!(screen.contains("error history"));
    }

    #[test]
    fn error_history_shows_denials() {
        let (_dir, mut app) = journal_app();
        app.login.input = "wrong".into();
        app.submit_secret();
        app.overlay = Overlay::ErrorHistory;

        let screen = render_to_string(&app, 120, 34);
        assert!(screen.contains("Error History (1)"));
        assert!(screen.contains("[AUTH]"));
    }

    #[test]
    fn empty_error_history() {
        let (_dir, mut app) = journal_app();
        app.overlay = Overlay::ErrorHistory;
        let screen = render_to_string(&app, 120, 34);
        assert!(screen.contains("No errors recorded."));
    }
}
