//! Bottom status bar — key hints plus the last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    let hints = if app.is_unlocked() {
        " Tab:next ^S:save F1:help F2:errors ^Q:quit"
    } else {
        " Enter:unlock F1:help Esc:quit"
    };
    spans.push(Span::styled(hints, theme::muted()));

    if let Some((msg, level)) = &app.status_message {
        spans.push(Span::raw(" | "));
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Success => theme::positive(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use crate::test_helpers::{journal_app, render_to_string, unlocked_app};

    #[test]
    fn hints_follow_the_lock_state() {
        let (_dir, app) = journal_app();
        let screen = render_to_string(&app, 100, 30);
        assert!(screen.contains("Enter:unlock"));

        let (_dir, app) = unlocked_app();
        let screen = render_to_string(&app, 120, 34);
        assert!(screen.contains("^S:save"));
    }

    #[test]
    fn status_message_is_shown() {
        let (_dir, mut app) = unlocked_app();
        app.set_success("Trade saved! PnL: 10.00");
        let screen = render_to_string(&app, 120, 34);
        assert!(screen.contains("Trade saved! PnL: 10.00"));
    }
}
