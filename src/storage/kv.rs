//! Key-value slots for persisted blobs
//!
//! The expense store keeps its whole collection in a single text value under
//! one key. [`FileKeyValueStore`] maps each key to a JSON file in the data
//! directory; [`MemoryKeyValueStore`] keeps values in a shared map.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{ExpenseError, ExpenseResult};

use super::file_io::{read_text, write_text_atomic};

/// A device-local store of string values addressed by key
pub trait KeyValueStore: Send {
    /// Read the value under `key`, `None` if nothing was ever stored
    fn get_item(&self, key: &str) -> ExpenseResult<Option<String>>;

    /// Replace the value under `key`
    fn set_item(&mut self, key: &str, value: &str) -> ExpenseResult<()>;
}

/// One file per key, written atomically
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// File backing `key`: `@expenses` lives in `expenses.json`
    pub fn slot_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .strip_prefix('@')
            .unwrap_or(key)
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get_item(&self, key: &str) -> ExpenseResult<Option<String>> {
        read_text(self.slot_path(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> ExpenseResult<()> {
        write_text_atomic(self.slot_path(key), value)
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    items: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
    writes: usize,
}

/// In-memory store; clones share the same map
///
/// Reads and writes can be switched to fail, which is how storage outages are
/// simulated.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `value` under `key`
    pub fn with_item(key: &str, value: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut state) = store.lock() {
            state.items.insert(key.to_string(), value.into());
        }
        store
    }

    /// Current value under `key`, bypassing failure injection
    pub fn item(&self, key: &str) -> Option<String> {
        self.lock().ok().and_then(|state| state.items.get(key).cloned())
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.lock().map(|state| state.writes).unwrap_or(0)
    }

    pub fn set_fail_reads(&self, fail: bool) {
        if let Ok(mut state) = self.lock() {
            state.fail_reads = fail;
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut state) = self.lock() {
            state.fail_writes = fail;
        }
    }

    fn lock(&self) -> ExpenseResult<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire lock: {}", e)))
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> ExpenseResult<Option<String>> {
        let state = self.lock()?;
        if state.fail_reads {
            return Err(ExpenseError::Storage(format!("Failed to read {}", key)));
        }
        Ok(state.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> ExpenseResult<()> {
        let mut state = self.lock()?;
        if state.fail_writes {
            return Err(ExpenseError::Storage(format!("Failed to write {}", key)));
        }
        state.items.insert(key.to_string(), value.to_string());
        state.writes += 1;
        Ok(())
    }
}
