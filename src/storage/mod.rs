//! Storage layer for the expense log
//!
//! Provides the expense store, the key-value slots it persists into, and
//! JSON file helpers with atomic writes.

pub mod expenses;
pub mod file_io;
pub mod kv;
pub mod writer;

pub use expenses::{deserialize_expenses, serialize_expenses, ExpenseStore, STORAGE_KEY};
pub use file_io::{read_text, write_json_atomic, write_text_atomic};
pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};

use crate::config::paths::ExpensePaths;
use crate::error::ExpenseError;

/// Open the file-backed expense store under `paths`
pub fn open(paths: &ExpensePaths) -> Result<ExpenseStore, ExpenseError> {
    paths.ensure_directories()?;
    Ok(ExpenseStore::initialize(FileKeyValueStore::new(
        paths.data_dir(),
    )))
}
