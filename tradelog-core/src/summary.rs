//! Dashboard aggregates over the whole journal.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::error::JournalError;
use crate::store::TradeStore;
use crate::trade::TradeRecord;

/// The three numbers shown above the trade table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    pub total_pnl: Decimal,
    pub total_trades: usize,
    pub winning_trades: usize,
    /// Percentage in `[0, 100]`; zero when there are no trades.
    pub win_rate: Decimal,
}

impl Summary {
    /// Fails when the PnL total does not fit in a `Decimal`.
    pub fn from_records(records: &[TradeRecord]) -> Result<Self, JournalError> {
        let total_trades = records.len();
        let total_pnl = records
            .iter()
            .try_fold(Decimal::ZERO, |acc, r| acc.checked_add(r.pnl))
            .ok_or_else(|| JournalError::parse(None, "total PnL is out of range"))?;
        let winning_trades = records.iter().filter(|r| r.is_winner()).count();
        Ok(Self {
            total_pnl,
            total_trades,
            winning_trades,
            win_rate: win_rate(winning_trades, total_trades),
        })
    }

    /// `₹123.45`
    pub fn total_pnl_display(&self, currency: &str) -> String {
        format!("{currency}{:.2}", self.total_pnl.round_dp(2))
    }

    /// `66.7%`
    pub fn win_rate_display(&self) -> String {
        format!("{:.1}%", self.win_rate.round_dp(1))
    }
}

/// Winners as a percentage of all trades.
pub fn win_rate(winners: usize, total: usize) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(winners) * Decimal::ONE_HUNDRED / Decimal::from(total)
}

/// What the dashboard shows after reading the store.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    /// File readable, no rows yet.
    Empty,
    Trades {
        records: Vec<TradeRecord>,
        summary: Summary,
    },
    /// File unreadable or malformed; the message is shown in place of data.
    Error(String),
}

impl DashboardView {
    pub const EMPTY_MESSAGE: &'static str = "No trades logged yet.";
    pub const ERROR_MESSAGE: &'static str = "Could not read CSV file.";

    pub fn from_records(records: Vec<TradeRecord>) -> Result<Self, JournalError> {
        if records.is_empty() {
            return Ok(DashboardView::Empty);
        }
        let summary = Summary::from_records(&records)?;
        Ok(DashboardView::Trades { records, summary })
    }

    /// Read the store and build the view. Read failures become the error
    /// state rather than propagating.
    pub fn load(store: &TradeStore) -> Self {
        match store.read_all().and_then(Self::from_records) {
            Ok(view) => view,
            Err(err) => {
                warn!(error = %err, path = %store.path().display(), "could not read journal");
                DashboardView::Error(err.to_string())
            }
        }
    }

    pub fn summary(&self) -> Option<&Summary> {
        match self {
            DashboardView::Trades { summary, .. } => Some(summary),
            _ => None,
        }
    }

    pub fn records(&self) -> &[TradeRecord] {
        match self {
            DashboardView::Trades { records, .. } => records,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trade::Direction;
    use chrono::NaiveDate;

    fn make_trade(pnl: i64) -> TradeRecord {
        TradeRecord {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            symbol: "SPY".into(),
            direction: Direction::Long,
            entry: Decimal::from(100),
            exit: Decimal::from(100 + pnl),
            pnl: Decimal::from(pnl),
            notes: String::new(),
        }
    }

    #[test]
    fn mixed_trades() {
        let trades: Vec<_> = [10, -5, 3, 0].into_iter().map(make_trade).collect();
        let summary = Summary::from_records(&trades).unwrap();
        assert_eq!(summary.total_pnl, Decimal::from(8));
        assert_eq!(summary.total_trades, 4);
        assert_eq!(summary.winning_trades, 2);
        assert_eq!(summary.win_rate, Decimal::from(50));
        assert_eq!(summary.win_rate_display(), "50.0%");
        assert_eq!(summary.total_pnl_display("₹"), "₹8.00");
    }

    #[test]
    fn empty_win_rate_is_zero() {
        let summary = Summary::from_records(&[]).unwrap();
        assert_eq!(summary.win_rate, Decimal::ZERO);
        assert_eq!(summary.total_pnl, Decimal::ZERO);
        assert_eq!(summary.total_trades, 0);
    }

    #[test]
    fn breakeven_is_not_a_win() {
        let summary = Summary::from_records(&[make_trade(0)]).unwrap();
        assert_eq!(summary.winning_trades, 0);
        assert_eq!(summary.win_rate, Decimal::ZERO);
    }

    #[test]
    fn win_rate_rounds_for_display() {
        let trades: Vec<_> = [1, 1, -1].into_iter().map(make_trade).collect();
        assert_eq!(Summary::from_records(&trades).unwrap().win_rate_display(), "66.7%");
    }

    #[test]
    fn negative_total_formats_with_sign() {
        let trades: Vec<_> = [-7, 2].into_iter().map(make_trade).collect();
        assert_eq!(
            Summary::from_records(&trades).unwrap().total_pnl_display("$"),
            "$-5.00"
        );
    }

    #[test]
    fn view_states() {
        assert_eq!(
            DashboardView::from_records(vec![]).unwrap(),
            DashboardView::Empty
        );
        let view = DashboardView::from_records(vec![make_trade(4)]).unwrap();
        assert_eq!(view.records().len(), 1);
        assert_eq!(view.summary().unwrap().total_trades, 1);
        assert!(DashboardView::Error("boom".into()).summary().is_none());
    }

    #[test]
    fn total_overflow_is_an_error() {
        let mut big = make_trade(0);
        big.pnl = Decimal::MAX;
        let err = Summary::from_records(&[big.clone(), big.clone()]).unwrap_err();
        assert_eq!(err.label(), "PARSE");
        assert!(DashboardView::from_records(vec![big.clone(), big]).is_err());
    }

    #[test]
    fn overflowing_journal_loads_as_error_view() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TradeStore::new(dir.path().join("trades.csv"));
        store.ensure_initialized().unwrap();
        let exit = crate::trade::parse_price("exit price", "50000000000000000000000000000").unwrap();
        let record = TradeRecord::from_entry(crate::trade::NewTrade {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            symbol: "big".into(),
            direction: Direction::Long,
            entry: Decimal::ZERO,
            exit,
            notes: String::new(),
        })
        .unwrap();
        store.append(&record).unwrap();
        store.append(&record).unwrap();

        match DashboardView::load(&store) {
            DashboardView::Error(message) => assert!(message.contains("out of range")),
            other => panic!("expected error view, got {other:?}"),
        }
    }

    #[test]
    fn unreadable_store_becomes_error_view() {
        let dir = tempfile::tempdir().unwrap();
        let store = TradeStore::new(dir.path().join("missing.csv"));
        assert!(matches!(DashboardView::load(&store), DashboardView::Error(_)));
    }
}
