//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here, including the access session. Key handlers in
//! `input` mutate it; `ui` only reads it.

use std::collections::VecDeque;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::info;

use tradelog_core::{
    AccessState, DashboardView, Gatekeeper, JournalError, Session, TradeRecord, TradeStore,
};

use crate::form::TradeForm;

/// Cap on the error history overlay.
pub const ERROR_HISTORY_CAP: usize = 50;

/// Which journal widget receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Date,
    Symbol,
    Direction,
    Entry,
    Exit,
    Notes,
    Save,
    Trades,
}

impl Focus {
    const ALL: [Focus; 8] = [
        Focus::Date,
        Focus::Symbol,
        Focus::Direction,
        Focus::Entry,
        Focus::Exit,
        Focus::Notes,
        Focus::Save,
        Focus::Trades,
    ];

    pub fn index(self) -> usize {
        match self {
            Focus::Date => 0,
            Focus::Symbol => 1,
            Focus::Direction => 2,
            Focus::Entry => 3,
            Focus::Exit => 4,
            Focus::Notes => 5,
            Focus::Save => 6,
            Focus::Trades => 7,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Focus::Date => "Date",
            Focus::Symbol => "Symbol",
            Focus::Direction => "Direction",
            Focus::Entry => "Entry Price",
            Focus::Exit => "Exit Price",
            Focus::Notes => "Notes / Strategy",
            Focus::Save => "Save Trade",
            Focus::Trades => "Recent Trades",
        }
    }

    pub fn next(self) -> Focus {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Focus {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Part of the entry form (as opposed to the trade table).
    pub fn in_form(self) -> bool {
        self != Focus::Trades
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: &'static str,
    pub message: String,
    pub context: String,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    ErrorHistory,
}

/// Login screen state.
#[derive(Debug, Default)]
pub struct LoginState {
    pub input: String,
}

/// Dashboard state: last loaded view plus table scroll.
#[derive(Debug)]
pub struct DashboardState {
    pub view: DashboardView,
    pub scroll: usize,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            view: DashboardView::Empty,
            scroll: 0,
        }
    }
}

impl DashboardState {

    pub fn row_count(&self) -> usize {
        self.view.records().len()
    }

    pub fn scroll_down(&mut self) {
        if self.scroll + 1 < self.row_count() {
            self.scroll += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_to_end(&mut self) {
        self.scroll = self.row_count().saturating_sub(1);
    }
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,

    // Access
    pub gate: Gatekeeper,
    pub session: Session,
    pub login: LoginState,

    // Journal
    pub store: TradeStore,
    pub currency: String,
    pub form: TradeForm,
    pub focus: Focus,
    pub dashboard: DashboardState,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
}

impl AppState {
    pub fn new(gate: Gatekeeper, store: TradeStore, currency: impl Into<String>) -> Self {
        Self {
            running: true,
            gate,
            session: Session::new(),
            login: LoginState::default(),
            store,
            currency: currency.into(),
            form: TradeForm::new(today()),
            focus: Focus::Date,
            dashboard: DashboardState::default(),
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.session.is_unlocked()
    }

    /// Submit whatever is in the login input. The input is cleared either way.
    pub fn submit_secret(&mut self) -> AccessState {
        let submitted = std::mem::take(&mut self.login.input);
        let state = self.session.submit(&self.gate, &submitted);
        match state {
            AccessState::Unlocked => {
                self.status_message = None;
                self.open_journal();
            }
            AccessState::Denied => {
                self.push_error(&JournalError::AuthDenied, "login");
            }
            AccessState::Locked => {}
        }
        state
    }

    /// First thing after unlocking: make sure the file exists, then load it.
    fn open_journal(&mut self) {
        match self.store.ensure_initialized() {
            Ok(true) => self.set_status(format!("Created {}", self.store.path().display())),
            Ok(false) => {}
            Err(err) => self.push_error(&err, "initializing journal"),
        }
        self.refresh_dashboard();
    }

    /// Validate the form, append the trade, clear the form and reload.
    ///
    /// Returns the stored record on success. Failures leave the form as
    /// typed so the user can fix it.
    pub fn submit_trade(&mut self) -> Option<TradeRecord> {
        if !self.is_unlocked() {
            return None;
        }
        let record = match self
            .form
            .to_new_trade()
            .and_then(TradeRecord::from_entry)
        {
            Ok(record) => record,
            Err(err) => {
                self.push_error(&err, "trade form");
                return None;
            }
        };

        if let Err(err) = self.store.append(&record) {
            self.push_error(&err, "Error saving data");
            return None;
        }

        self.set_success(format!("Trade saved! PnL: {}", record.pnl));
        self.form.reset(today());
        self.focus = Focus::Date;
        self.refresh_dashboard();
        self.dashboard.scroll_to_end();
        Some(record)
    }

    /// Re-read the store into the dashboard.
    pub fn refresh_dashboard(&mut self) {
        self.dashboard.view = DashboardView::load(&self.store);
        if let DashboardView::Error(message) = &self.dashboard.view {
            let message = message.clone();
            self.record_error("PARSE", DashboardView::ERROR_MESSAGE.to_string(), message);
        }
        let rows = self.dashboard.row_count();
        if self.dashboard.scroll >= rows {
            self.dashboard.scroll = rows.saturating_sub(1);
        }
    }

    /// Record a journal error and show it in the status bar.
    pub fn push_error(&mut self, err: &JournalError, context: &str) {
        let message = match err {
            JournalError::AuthDenied => "Password incorrect".to_string(),
            JournalError::Io { .. } => format!("{context}: {err}"),
            _ => err.to_string(),
        };
        self.record_error(err.label(), message, context.to_string());
    }

    fn record_error(&mut self, category: &'static str, message: String, context: String) {
        info!(category, %message, "error shown to user");
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a success status message.
    pub fn set_success(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Success));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
