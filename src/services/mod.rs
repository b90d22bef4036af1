//! Service layer for the expense log
//!
//! Sits between the front end and the expense store: entry validation on
//! the way in, month views on the way out.

pub mod entry;
pub mod history;

pub use entry::{resolve_entry_date, EntryService, ExpenseEntry};
pub use history::{month_name, HistoryService, MonthView};
