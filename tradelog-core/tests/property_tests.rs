//! Property tests for journal invariants.
//!
//! Uses proptest to verify:
//! 1. PnL sign — LONG is exit − entry, SHORT is entry − exit
//! 2. Ordering — N appends read back as the same N records in order
//! 3. Win rate bounds — always within [0, 100]

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tradelog_core::{Direction, NewTrade, Summary, TradeRecord, TradeStore};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Long), Just(Direction::Short)]
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..3650).prop_map(|days| {
        NaiveDate::from_ymd_opt(2015, 1, 1).unwrap() + chrono::Duration::days(days)
    })
}

fn arb_entry() -> impl Strategy<Value = NewTrade> {
    (
        arb_date(),
        "[a-zA-Z]{1,10}",
        arb_direction(),
        arb_price(),
        arb_price(),
        "[ -~\n]{0,40}",
    )
        .prop_map(|(date, symbol, direction, entry, exit, notes)| NewTrade {
            date,
            symbol,
            direction,
            entry,
            exit,
            notes,
        })
}

// ── 1. PnL sign ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn pnl_follows_direction(entry in arb_entry()) {
        let record = TradeRecord::from_entry(entry.clone()).unwrap();
        let expected = match entry.direction {
            Direction::Long => entry.exit - entry.entry,
            Direction::Short => entry.entry - entry.exit,
        };
        prop_assert_eq!(record.pnl, expected);
        prop_assert_eq!(record.symbol, entry.symbol.to_uppercase());
    }
}

// ── 2. Ordering ──────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn appends_read_back_in_order(entries in prop::collection::vec(arb_entry(), 0..12)) {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TradeStore::new(dir.path().join("trades.csv"));
        store.ensure_initialized().unwrap();

        let written: Vec<TradeRecord> = entries
            .into_iter()
            .map(|e| TradeRecord::from_entry(e).unwrap())
            .collect();
        for record in &written {
            store.append(record).unwrap();
        }

        let read = store.read_all().unwrap();
        prop_assert_eq!(read, written);
    }
}

// ── 3. Win rate bounds ───────────────────────────────────────────────

proptest! {
    #[test]
    fn win_rate_is_a_percentage(pnls in prop::collection::vec(-1000i64..1000, 0..50)) {
        let records: Vec<TradeRecord> = pnls
            .iter()
            .map(|&p| TradeRecord {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                symbol: "X".into(),
                direction: Direction::Long,
                entry: Decimal::ZERO,
                exit: Decimal::from(p),
                pnl: Decimal::from(p),
                notes: String::new(),
            })
            .collect();
        let summary = Summary::from_records(&records).unwrap();
        prop_assert!(summary.win_rate >= Decimal::ZERO);
        prop_assert!(summary.win_rate <= Decimal::ONE_HUNDRED);
        prop_assert_eq!(summary.total_pnl, Decimal::from(pnls.iter().sum::<i64>()));
        prop_assert_eq!(summary.total_trades, pnls.len());
    }
}
