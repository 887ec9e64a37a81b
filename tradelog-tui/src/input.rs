//! Keyboard input dispatch — global keys → overlays → screen-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Focus, Overlay};
use crate::form::{is_date_char, is_price_char, TradeForm};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Quit works everywhere, text fields included.
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
        app.running = false;
        return;
    }

    // 2. Overlays consume input first.
    match app.overlay {
        Overlay::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Enter) {
                app.overlay = Overlay::None;
            }
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 3. Function keys.
    match key.code {
        KeyCode::F(1) => {
            app.overlay = Overlay::Help;
            return;
        }
        KeyCode::F(2) => {
            app.overlay = Overlay::ErrorHistory;
            app.error_scroll = 0;
            return;
        }
        _ => {}
    }

    // 4. Nothing past the gate until the session is unlocked.
    if app.is_unlocked() {
        handle_journal_key(app, key);
    } else {
        handle_login_key(app, key);
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::F(2) => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_login_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            app.submit_secret();
        }
        KeyCode::Backspace => {
            app.login.input.pop();
        }
        KeyCode::Esc => {
            app.running = false;
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.login.input.push(c);
        }
        _ => {}
    }
}

fn handle_journal_key(app: &mut AppState, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Tab => {
            app.focus = if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.focus.prev()
            } else {
                app.focus.next()
            };
            return;
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
            return;
        }
        KeyCode::Char('s') if ctrl => {
            if app.focus.in_form() {
                app.submit_trade();
            }
            return;
        }
        _ => {}
    }

    match app.focus {
        Focus::Date => handle_date_key(app, key),
        Focus::Symbol => {
            if !edit_text(&mut app.form.symbol, key, |c| !c.is_control()) {
                advance_on_enter(app, key);
            }
        }
        Focus::Direction => handle_direction_key(app, key),
        Focus::Entry => handle_price_key(app, key, |form| &mut form.entry),
        Focus::Exit => handle_price_key(app, key, |form| &mut form.exit),
        Focus::Notes => handle_notes_key(app, key),
        Focus::Save => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                app.submit_trade();
            }
        }
        Focus::Trades => handle_trades_key(app, key),
    }
}

/// Shared single-line editing. Returns true if the key was consumed.
fn edit_text(text: &mut String, key: KeyEvent, accept: impl Fn(char) -> bool) -> bool {
    match key.code {
        KeyCode::Backspace => {
            text.pop();
            true
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) && accept(c) => {
            text.push(c);
            true
        }
        _ => false,
    }
}

fn advance_on_enter(app: &mut AppState, key: KeyEvent) {
    if key.code == KeyCode::Enter {
        app.focus = app.focus.next();
    }
}

fn handle_date_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('+') => app.form.step_date(1),
        KeyCode::Down => app.form.step_date(-1),
        // `-` is also the separator, so it steps only once the date is whole.
        KeyCode::Char('-') if app.form.date_is_complete() => app.form.step_date(-1),
        KeyCode::PageUp => app.form.step_date(7),
        KeyCode::PageDown => app.form.step_date(-7),
        _ => {
            if !edit_text(&mut app.form.date, key, is_date_char) {
                advance_on_enter(app, key);
            }
        }
    }
}

fn handle_direction_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Left
        | KeyCode::Right
        | KeyCode::Up
        | KeyCode::Down
        | KeyCode::Char(' ')
        | KeyCode::Char('h')
        | KeyCode::Char('l') => {
            app.form.direction = app.form.direction.toggle();
        }
        KeyCode::Char('L') => app.form.direction = tradelog_core::Direction::Long,
        KeyCode::Char('S') => app.form.direction = tradelog_core::Direction::Short,
        _ => advance_on_enter(app, key),
    }
}

fn handle_price_key(
    app: &mut AppState,
    key: KeyEvent,
    field: impl Fn(&mut TradeForm) -> &mut String,
) {
    match key.code {
        KeyCode::Up => TradeForm::step_price(field(&mut app.form), 1),
        KeyCode::Down => TradeForm::step_price(field(&mut app.form), -1),
        KeyCode::Char(c) if !is_price_char(c) => {
            app.set_warning("Prices accept digits and '.' only");
        }
        _ => {
            if !edit_text(field(&mut app.form), key, is_price_char) {
                advance_on_enter(app, key);
            }
        }
    }
}

fn handle_notes_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.form.notes.push('\n'),
        _ => {
            edit_text(&mut app.form.notes, key, |c| !c.is_control());
        }
    }
}

fn handle_trades_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.dashboard.scroll_down(),
        KeyCode::Char('k') | KeyCode::Up => app.dashboard.scroll_up(),
        KeyCode::Home | KeyCode::Char('g') => app.dashboard.scroll = 0,
        KeyCode::End | KeyCode::Char('G') => app.dashboard.scroll_to_end(),
        KeyCode::Char('r') => {
            app.refresh_dashboard();
            app.set_status("Reloaded");
        }
        _ => {}
    }
}
