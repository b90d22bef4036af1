//! Expense record model
//!
//! A record is created once by the store and never edited afterwards; the
//! only other thing that can happen to it is deletion.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use super::ids::ExpenseId;
use super::money::Money;

/// A point in time carrying the offset it was recorded in
///
/// Month/year bucketing happens in that offset, i.e. in the calendar the user
/// saw when entering the expense.
pub type ExpenseDate = DateTime<FixedOffset>;

/// One user-entered expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: ExpenseId,

    #[serde(with = "timestamp")]
    pub date: ExpenseDate,

    /// What the money was spent on (trimmed, non-empty)
    pub item: String,

    /// Positive amount spent
    pub amount: Money,
}

impl ExpenseRecord {
    pub fn new(id: ExpenseId, item: impl Into<String>, amount: Money, date: ExpenseDate) -> Self {
        Self {
            id,
            date,
            item: item.into(),
            amount,
        }
    }

    /// Calendar day of the expense
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Zero-based month (January = 0)
    pub fn month0(&self) -> u32 {
        self.date.month0()
    }

    /// Whether the expense falls in `year` and zero-based `month0`
    pub fn falls_in(&self, year: i32, month0: u32) -> bool {
        self.year() == year && self.month0() == month0
    }
}

/// Serde adapter for [`ExpenseDate`]
///
/// Writes RFC 3339 with millisecond precision and the recorded offset. Reads
/// any RFC 3339 timestamp, and bare `YYYY-MM-DD` days as midnight UTC.
pub mod timestamp {
    use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat};
    use serde::{Deserialize, Deserializer, Serializer};

    use super::ExpenseDate;

    pub fn serialize<S: Serializer>(date: &ExpenseDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ExpenseDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub fn format(date: &ExpenseDate) -> String {
        date.to_rfc3339_opts(SecondsFormat::Millis, false)
    }

    /// Rebuild a date from its persisted scalar form
    pub fn parse(raw: &str) -> Result<ExpenseDate, String> {
        let raw = raw.trim();

        if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
            return Ok(date);
        }

        if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Ok(day.and_time(NaiveTime::MIN).and_utc().fixed_offset());
        }

        Err(format!("invalid expense date: {:?}", raw))
    }
}
