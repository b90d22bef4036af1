//! Monthly history
//!
//! Builds what the history browser shows: one month's expenses, newest
//! first, with their total, plus the window of years a user may pick from.

use chrono::Datelike;

use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseRecord, Money};
use crate::storage::ExpenseStore;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Widest span, in either direction, the history window may cover
pub const MAX_WINDOW_YEARS: u32 = 100;

/// Full English name of a zero-based month
pub fn month_name(month0: u32) -> Option<&'static str> {
    MONTH_NAMES.get(month0 as usize).copied()
}

/// One month of expenses as displayed
#[derive(Debug, Clone, PartialEq)]
pub struct MonthView {
    pub year: i32,
    /// Zero-based month
    pub month0: u32,
    /// Sorted by date, newest first
    pub expenses: Vec<ExpenseRecord>,
    pub total: Money,
}

impl MonthView {
    /// Heading such as "March 2024"
    pub fn label(&self) -> String {
        format!("{} {}", month_name(self.month0).unwrap_or("?"), self.year)
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}

/// Read-side service over the expense store
pub struct HistoryService<'a> {
    store: &'a ExpenseStore,
    settings: &'a Settings,
}

impl<'a> HistoryService<'a> {
    pub fn new(store: &'a ExpenseStore, settings: &'a Settings) -> Self {
        Self { store, settings }
    }

    /// Expenses for `year` and zero-based `month0`, newest first, with total
    pub fn month_view(&self, year: i32, month0: u32) -> ExpenseResult<MonthView> {
        if month0 > 11 {
            return Err(ExpenseError::Validation(format!(
                "Month must be between 1 and 12, got {}",
                month0 + 1
            )));
        }

        let mut expenses = self.store.expenses_by_month(year, month0);
        // Stable sort keeps insertion order for identical timestamps
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        let total = expenses.iter().map(|e| e.amount).sum();

        Ok(MonthView {
            year,
            month0,
            expenses,
            total,
        })
    }

    /// Years offered around `current_year`, oldest first
    ///
    /// Each side is clamped to [`MAX_WINDOW_YEARS`].
    pub fn year_window(&self, current_year: i32) -> Vec<i32> {
        let clamp = |years: u32| years.min(MAX_WINDOW_YEARS) as i32;
        let back = clamp(self.settings.history_years_back);
        let ahead = clamp(self.settings.history_years_ahead);
        (current_year.saturating_sub(back)..=current_year.saturating_add(ahead)).collect()
    }

    /// Check `year` against the window around `today`
    pub fn check_year(&self, year: i32, today: impl Datelike) -> ExpenseResult<()> {
        let window = self.year_window(today.year());
        if window.contains(&year) {
            Ok(())
        } else {
            Err(ExpenseError::Validation(format!(
                "Year {} is outside the history window ({}-{})",
                year,
                window.first().copied().unwrap_or(year),
                window.last().copied().unwrap_or(year)
            )))
        }
    }
}
