//! Expense log - personal expense tracking from the terminal
//!
//! Record dated expenses (item, amount, date) and browse them month by
//! month with a running total. All data lives in a single JSON blob on
//! the local machine.
//!
//! # Architecture
//!
//! - `config`: path resolution and user settings
//! - `error`: custom error types
//! - `models`: expense records, ids and money
//! - `storage`: the expense store and the key-value slots it persists into
//! - `services`: entry validation and monthly history
//! - `display`: terminal formatting
//! - `cli`: command handlers
//! - `logging`: tracing subscriber setup
//!
//! # Example
//!
//! ```rust,no_run
//! use expense_cli::config::ExpensePaths;
//! use expense_cli::models::Money;
//!
//! # fn main() -> Result<(), expense_cli::ExpenseError> {
//! let paths = ExpensePaths::new()?;
//! let mut store = expense_cli::storage::open(&paths)?;
//! store.add_expense("Coffee", Money::from_cents(450), chrono::Local::now().fixed_offset());
//! let march = store.expenses_by_month(2024, 2);
//! # let _ = march;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
