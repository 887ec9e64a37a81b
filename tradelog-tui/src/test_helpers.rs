//! Test helpers for building app state against a scratch journal.

use ratatui::backend::TestBackend;
use ratatui::Terminal;
use tempfile::TempDir;
use tradelog_core::{Direction, Gatekeeper, Secret, TradeStore};

use crate::app::AppState;

/// A locked app whose journal lives in a fresh temp dir. Keep the `TempDir`
/// alive for the duration of the test.
pub fn journal_app() -> (TempDir, AppState) {
    let dir = tempfile::tempdir().unwrap();
    let store = TradeStore::new(dir.path().join("trades.csv"));
    let gate = Gatekeeper::new(Secret::Plain("trader123".into()));
    (dir, AppState::new(gate, store, "₹"))
}

/// Same as [`journal_app`] but already through the gate.
pub fn unlocked_app() -> (TempDir, AppState) {
    let (dir, mut app) = journal_app();
    app.login.input = "trader123".into();
    app.submit_secret();
    (dir, app)
}

pub fn fill_form(app: &mut AppState, symbol: &str, direction: Direction, entry: &str, exit: &str) {
    app.form.symbol = symbol.into();
    app.form.direction = direction;
    app.form.entry = entry.into();
    app.form.exit = exit.into();
}

/// Draw the whole UI into an in-memory terminal and return it as text,
/// one line per row.
pub fn render_to_string(app: &AppState, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| crate::ui::draw(f, app)).unwrap();
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}
