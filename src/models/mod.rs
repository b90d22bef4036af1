//! Core data models for the expense log
//!
//! An expense is an id, a dated timestamp, an item label and a positive
//! amount. Amounts use [`Money`], stored as integer cents.

pub mod expense;
pub mod ids;
pub mod money;

pub use expense::{ExpenseDate, ExpenseRecord};
pub use ids::{ExpenseId, IdGenerator};
pub use money::{Money, MoneyParseError};
