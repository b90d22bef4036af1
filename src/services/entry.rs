//! Expense entry
//!
//! The add form's side of the contract: raw user input is checked here and
//! only a valid entry is handed to the store.

use chrono::{NaiveDate, TimeZone};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseDate, ExpenseId, Money, MoneyParseError};
use crate::storage::ExpenseStore;

pub const MISSING_ITEM: &str = "Please enter an item name";
pub const INVALID_AMOUNT: &str = "Please enter a valid amount";

/// A validated expense, ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseEntry {
    pub item: String,
    pub amount: Money,
    pub date: ExpenseDate,
}

impl ExpenseEntry {
    /// Validate raw form input
    ///
    /// The item is trimmed and must not be empty; the amount must parse, be
    /// greater than zero and no larger than [`Money::MAX`].
    pub fn validate(item: &str, amount: &str, date: ExpenseDate) -> ExpenseResult<Self> {
        let item = item.trim();
        if item.is_empty() {
            return Err(ExpenseError::Validation(MISSING_ITEM.into()));
        }

        let amount = match Money::parse(amount) {
            Ok(amount) if amount.is_positive() => amount,
            Err(err @ MoneyParseError::OutOfRange(_)) => {
                return Err(ExpenseError::Validation(err.to_string()))
            }
            _ => return Err(ExpenseError::Validation(INVALID_AMOUNT.into())),
        };

        Ok(Self {
            item: item.to_string(),
            amount,
            date,
        })
    }
}

/// Resolve the date chosen on the form
///
/// No date means `now`. A `YYYY-MM-DD` day keeps the time of day and offset
/// of `now`, the way a date picker only swaps the calendar day.
pub fn resolve_entry_date(raw: Option<&str>, now: ExpenseDate) -> ExpenseResult<ExpenseDate> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(now);
    };

    let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        ExpenseError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", raw))
    })?;

    now.offset()
        .from_local_datetime(&day.and_time(now.time()))
        .single()
        .ok_or_else(|| ExpenseError::Validation(format!("Invalid date '{}'", raw)))
}

/// Submits validated entries to the store
pub struct EntryService<'a> {
    store: &'a mut ExpenseStore,
}

impl<'a> EntryService<'a> {
    pub fn new(store: &'a mut ExpenseStore) -> Self {
        Self { store }
    }

    /// Validate and add an expense in one step
    pub fn add(&mut self, item: &str, amount: &str, date: ExpenseDate) -> ExpenseResult<ExpenseId> {
        let entry = ExpenseEntry::validate(item, amount, date)?;
        Ok(self.submit(entry))
    }

    pub fn submit(&mut self, entry: ExpenseEntry) -> ExpenseId {
        let ExpenseEntry { item, amount, date } = entry;
        self.store.add_expense(item, amount, date)
    }
}
