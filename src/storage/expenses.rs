//! Expense store
//!
//! Holds the authoritative in-memory list of expenses. Every mutation
//! rewrites the whole collection under [`STORAGE_KEY`] through the
//! background writer; reads only ever touch memory.

use chrono::{SubsecRound, Utc};
use tracing::{info, warn};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseDate, ExpenseId, ExpenseRecord, IdGenerator, Money};

use super::kv::KeyValueStore;
use super::writer::BlobWriter;

/// Key under which the whole collection is persisted
pub const STORAGE_KEY: &str = "@expenses";

/// Serialize a collection into the persisted blob format
pub fn serialize_expenses(expenses: &[ExpenseRecord]) -> ExpenseResult<String> {
    serde_json::to_string(expenses)
        .map_err(|e| ExpenseError::Json(format!("Failed to serialize expenses: {}", e)))
}

/// Rebuild a collection from a persisted blob
///
/// Dates are reconstructed from their timestamp strings here; a record with an
/// unreadable date fails the whole blob.
pub fn deserialize_expenses(blob: &str) -> ExpenseResult<Vec<ExpenseRecord>> {
    serde_json::from_str(blob)
        .map_err(|e| ExpenseError::Json(format!("Failed to parse expenses: {}", e)))
}

/// In-memory expense collection with write-behind persistence
pub struct ExpenseStore {
    expenses: Vec<ExpenseRecord>,
    ids: IdGenerator,
    writer: BlobWriter,
}

impl ExpenseStore {
    /// Load the persisted collection from `kv` and start the writer
    ///
    /// A missing, unreadable or corrupt blob yields an empty store; the
    /// problem is logged, never returned.
    pub fn initialize<S: KeyValueStore + 'static>(kv: S) -> Self {
        let expenses = load_expenses(&kv);

        let mut ids = IdGenerator::new();
        for expense in &expenses {
            ids.observe(&expense.id);
        }

        info!(count = expenses.len(), "Expense store ready");

        Self {
            expenses,
            ids,
            writer: BlobWriter::spawn(kv),
        }
    }

    /// Append a new expense and schedule a save
    ///
    /// Inputs are taken as given; the entry form is responsible for
    /// validating them. The date is kept to millisecond precision, the
    /// precision of the persisted form.
    pub fn add_expense(
        &mut self,
        item: impl Into<String>,
        amount: Money,
        date: ExpenseDate,
    ) -> ExpenseId {
        let id = self.ids.next(Utc::now().timestamp_millis());
        self.expenses.push(ExpenseRecord::new(
            id.clone(),
            item,
            amount,
            date.trunc_subsecs(3),
        ));
        self.persist();
        id
    }

    /// Remove the expense with `id` and schedule a save
    ///
    /// Returns whether anything was removed. An unknown id is not an error.
    pub fn delete_expense(&mut self, id: &ExpenseId) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|expense| &expense.id != id);
        self.persist();
        self.expenses.len() != before
    }

    /// Expenses dated in `year` and zero-based `month0`, in storage order
    pub fn expenses_by_month(&self, year: i32, month0: u32) -> Vec<ExpenseRecord> {
        self.expenses
            .iter()
            .filter(|expense| expense.falls_in(year, month0))
            .cloned()
            .collect()
    }

    /// All expenses in insertion order
    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    pub fn get(&self, id: &ExpenseId) -> Option<&ExpenseRecord> {
        self.expenses.iter().find(|expense| &expense.id == id)
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Schedule a write of the current collection
    pub fn persist(&self) {
        match serialize_expenses(&self.expenses) {
            Ok(blob) => self.writer.submit(STORAGE_KEY, blob),
            Err(e) => warn!(error = %e, "Failed to save expenses"),
        }
    }

    /// Wait until all scheduled writes have been attempted
    pub fn flush(&self) {
        self.writer.flush();
    }
}

fn load_expenses<S: KeyValueStore>(kv: &S) -> Vec<ExpenseRecord> {
    let blob = match kv.get_item(STORAGE_KEY) {
        Ok(Some(blob)) if !blob.trim().is_empty() => blob,
        Ok(_) => return Vec::new(),
        Err(e) => {
            warn!(error = %e, "Failed to load expenses; starting empty");
            return Vec::new();
        }
    };

    deserialize_expenses(&blob).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load expenses; starting empty");
        Vec::new()
    })
}
