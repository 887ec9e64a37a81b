//! Trade entry form — raw field text plus conversion to a `NewTrade`.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use tradelog_core::trade::{parse_date, parse_decimal, parse_price, DATE_FORMAT};
use tradelog_core::{Direction, JournalError, NewTrade};

/// Price step for Up/Down on the price fields: 0.05.
fn price_step() -> Decimal {
    Decimal::new(5, 2)
}

/// Field text exactly as typed. Parsing happens on submit.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeForm {
    pub date: String,
    pub symbol: String,
    pub direction: Direction,
    pub entry: String,
    pub exit: String,
    pub notes: String,
}

impl TradeForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: today.format(DATE_FORMAT).to_string(),
            symbol: String::new(),
            direction: Direction::Long,
            entry: "0.00".into(),
            exit: "0.00".into(),
            notes: String::new(),
        }
    }

    /// Clear every field back to its default.
    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }

    /// Parse the fields. Does not touch the symbol beyond what the record
    /// constructor does.
    pub fn to_new_trade(&self) -> Result<NewTrade, JournalError> {
        Ok(NewTrade {
            date: parse_date("date", &self.date)?,
            symbol: self.symbol.clone(),
            direction: self.direction,
            entry: parse_price("entry price", &self.entry)?,
            exit: parse_price("exit price", &self.exit)?,
            notes: self.notes.clone(),
        })
    }

    /// The date field holds a full `YYYY-MM-DD` date.
    pub fn date_is_complete(&self) -> bool {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).is_ok()
    }

    /// Move the date by `days` (negative goes back). An unparseable date is
    /// left alone.
    pub fn step_date(&mut self, days: i64) {
        let Ok(date) = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT) else {
            return;
        };
        let stepped = if days >= 0 {
            date.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            date.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        if let Some(stepped) = stepped {
            self.date = stepped.format(DATE_FORMAT).to_string();
        }
    }

    /// Step a price field text by `steps × 0.05`, never below zero.
    pub fn step_price(text: &mut String, steps: i64) {
        let current = parse_decimal(text).unwrap_or(Decimal::ZERO);
        let next = (current + price_step() * Decimal::from(steps)).max(Decimal::ZERO);
        *text = format!("{:.2}", next.round_dp(2));
    }
}

/// Characters accepted by the price fields.
pub fn is_price_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Characters accepted by the date field.
pub fn is_date_char(c: char) -> bool {
    c.is_ascii_digit() || c == '-'
}
