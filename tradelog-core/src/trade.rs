//! TradeRecord — one logged round trip with its derived PnL.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::JournalError;

/// Date format used in the file and in the form.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which way the trade was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    #[default]
    Long,
    Short,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Long => "LONG",
            Direction::Short => "SHORT",
        }
    }

    pub fn toggle(self) -> Direction {
        match self {
            Direction::Long => Direction::Short,
            Direction::Short => Direction::Long,
        }
    }

    /// PnL of a round trip opened at `entry` and closed at `exit`.
    pub fn pnl(self, entry: Decimal, exit: Decimal) -> Decimal {
        match self {
            Direction::Long => exit - entry,
            Direction::Short => entry - exit,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LONG" => Ok(Direction::Long),
            "SHORT" => Ok(Direction::Short),
            other => Err(format!("unknown direction '{other}'")),
        }
    }
}

/// A trade as submitted through the form, before PnL is derived.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrade {
    pub date: NaiveDate,
    pub symbol: String,
    pub direction: Direction,
    pub entry: Decimal,
    pub exit: Decimal,
    pub notes: String,
}

/// A persisted trade. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub date: NaiveDate,
    pub symbol: String,
    pub direction: Direction,
    pub entry: Decimal,
    pub exit: Decimal,
    pub pnl: Decimal,
    pub notes: String,
}

impl TradeRecord {
    /// Build a record from a form submission: normalizes the symbol and
    /// derives PnL from the direction.
    pub fn from_entry(entry: NewTrade) -> Result<Self, JournalError> {
        ensure_non_negative("entry price", entry.entry)?;
        ensure_non_negative("exit price", entry.exit)?;
        let pnl = entry.direction.pnl(entry.entry, entry.exit);
        Ok(Self {
            date: entry.date,
            symbol: normalize_symbol(&entry.symbol),
            direction: entry.direction,
            entry: entry.entry,
            exit: entry.exit,
            pnl,
            notes: entry.notes,
        })
    }

    pub fn is_winner(&self) -> bool {
        self.pnl > Decimal::ZERO
    }
}

/// Upper-cased, surrounding whitespace removed.
pub fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Parse a decimal in plain or scientific notation (`100.05`, `1e-05`).
pub fn parse_decimal(text: &str) -> Result<Decimal, rust_decimal::Error> {
    let text = text.trim();
    Decimal::from_str(text).or_else(|_| Decimal::from_scientific(text))
}

/// Parse a user-entered price; rejects blanks, garbage and negatives.
pub fn parse_price(field: &'static str, text: &str) -> Result<Decimal, JournalError> {
    if text.trim().is_empty() {
        return Err(JournalError::invalid(field, "required"));
    }
    let value = parse_decimal(text)
        .map_err(|_| JournalError::invalid(field, format!("'{}' is not a number", text.trim())))?;
    ensure_non_negative(field, value)?;
    Ok(value)
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(field: &'static str, text: &str) -> Result<NaiveDate, JournalError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).map_err(|_| {
        JournalError::invalid(field, format!("'{}' is not a YYYY-MM-DD date", text.trim()))
    })
}

fn ensure_non_negative(field: &'static str, value: Decimal) -> Result<(), JournalError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(JournalError::invalid(field, "must not be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_entry(direction: Direction) -> NewTrade {
        NewTrade {
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            symbol: " nifty ".into(),
            direction,
            entry: dec("100.00"),
            exit: dec("110.00"),
            notes: "breakout".into(),
        }
    }

    #[test]
    fn long_pnl_is_exit_minus_entry() {
        let record = TradeRecord::from_entry(sample_entry(Direction::Long)).unwrap();
        assert_eq!(record.pnl, dec("10.00"));
        assert_eq!(record.pnl.to_string(), "10.00");
        assert!(record.is_winner());
    }

    #[test]
    fn short_pnl_is_entry_minus_exit() {
        let record = TradeRecord::from_entry(sample_entry(Direction::Short)).unwrap();
        assert_eq!(record.pnl, dec("-10.00"));
        assert!(!record.is_winner());
    }

    #[test]
    fn symbol_is_upper_cased_and_trimmed() {
        let record = TradeRecord::from_entry(sample_entry(Direction::Long)).unwrap();
        assert_eq!(record.symbol, "NIFTY");
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut entry = sample_entry(Direction::Long);
        entry.exit = dec("-1");
        let err = TradeRecord::from_entry(entry).unwrap_err();
        assert!(matches!(
            err,
            JournalError::InvalidInput {
                field: "exit price",
                ..
            }
        ));
    }

    #[test]
    fn zero_prices_are_allowed() {
        let mut entry = sample_entry(Direction::Long);
        entry.entry = Decimal::ZERO;
        entry.exit = Decimal::ZERO;
        let record = TradeRecord::from_entry(entry).unwrap();
        assert!(record.pnl.is_zero());
        assert!(!record.is_winner());
    }

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!("long".parse::<Direction>().unwrap(), Direction::Long);
        assert_eq!(" SHORT ".parse::<Direction>().unwrap(), Direction::Short);
        assert!("flat".parse::<Direction>().is_err());
        assert_eq!(Direction::Long.toggle(), Direction::Short);
        assert_eq!(Direction::Short.to_string(), "SHORT");
    }

    #[test]
    fn decimal_accepts_float_and_scientific_text() {
        assert_eq!(parse_decimal("100.0").unwrap(), dec("100.0"));
        assert_eq!(parse_decimal("1e-05").unwrap(), dec("0.00001"));
        assert!(parse_decimal("abc").is_err());
    }

    #[test]
    fn price_parsing() {
        assert_eq!(parse_price("entry price", " 99.95 ").unwrap(), dec("99.95"));
        assert!(parse_price("entry price", "").is_err());
        assert!(parse_price("entry price", "-3").is_err());
        assert!(parse_price("entry price", "ten").is_err());
    }

    #[test]
    fn date_parsing() {
        assert_eq!(
            parse_date("date", "2024-01-05").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
        assert!(parse_date("date", "05/01/2024").is_err());
    }
}
