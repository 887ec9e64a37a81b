//! TradeLog Core — everything the journal does that is not drawing pixels.
//!
//! - Trade records with derived PnL
//! - Append-only CSV trade store
//! - Dashboard summary (total PnL, trade count, win rate)
//! - Shared-secret gatekeeper and per-session access state
//! - Configuration loading and logging setup

pub mod config;
pub mod error;
pub mod gate;
pub mod logging;
pub mod store;
pub mod summary;
pub mod trade;

pub use config::{AccessConfig, Config, ConfigError, JournalConfig};
pub use error::JournalError;
pub use gate::{AccessState, Gatekeeper, Secret, Session};
pub use logging::LoggingConfig;
pub use store::{TradeStore, HEADER};
pub use summary::{DashboardView, Summary};
pub use trade::{Direction, NewTrade, TradeRecord};

#[cfg(test)]
mod tests {
    use super::*;

    /// The UI hands records and stores across module boundaries freely;
    /// keep the core types thread-safe so that never becomes a retrofit.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<TradeRecord>();
        require_sync::<TradeRecord>();
        require_send::<TradeStore>();
        require_sync::<TradeStore>();
        require_send::<Gatekeeper>();
        require_sync::<Gatekeeper>();
        require_send::<Summary>();
        require_sync::<Summary>();
        require_send::<JournalError>();
    }
}
