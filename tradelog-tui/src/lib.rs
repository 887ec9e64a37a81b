//! Tradelog TUI - password-gated trade journal in the terminal
//!
//! Screens:
//! - Login: one masked secret input; nothing else is reachable until it passes
//! - Journal: "Log a New Trade" form beside the metrics and recent trades table
//!
//! Overlays for key help (F1) and error history (F2) sit on top of either.

pub mod app;
pub mod form;
pub mod input;
pub mod theme;
pub mod ui;

pub use app::AppState;
pub use input::handle_key;
pub use theme::Theme;

#[cfg(test)]
mod test_helpers;
