//! Expense identifiers
//!
//! An expense id is an opaque string. Freshly created ids are the creation
//! time in Unix milliseconds; [`IdGenerator`] bumps them past every id it has
//! seen so two expenses added within the same millisecond still differ.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Opaque, unique identifier of an expense record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Create an id from a creation timestamp in milliseconds
    pub fn from_millis(millis: i64) -> Self {
        Self(millis.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The timestamp this id encodes, if it is a generated (numeric) id
    pub fn millis(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ExpenseId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().to_string()))
    }
}

impl From<&str> for ExpenseId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ExpenseId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Issues time-derived ids that are strictly increasing
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: Option<i64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an existing id so later ids never collide with it
    pub fn observe(&mut self, id: &ExpenseId) {
        if let Some(millis) = id.millis() {
            self.last = Some(self.last.map_or(millis, |last| last.max(millis)));
        }
    }

    /// Issue an id for an expense created at `now_millis`
    pub fn next(&mut self, now_millis: i64) -> ExpenseId {
        let millis = match self.last {
            Some(last) if now_millis <= last => last.saturating_add(1),
            _ => now_millis,
        };
        self.last = Some(millis);
        ExpenseId::from_millis(millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_millis() {
        let id = ExpenseId::from_millis(1_709_630_000_000);
        assert_eq!(id.as_str(), "1709630000000");
        assert_eq!(id.millis(), Some(1_709_630_000_000));
        assert_eq!(id.to_string(), "1709630000000");
    }

    #[test]
    fn test_non_numeric_ids_are_opaque() {
        let id: ExpenseId = "legacy-entry".parse().unwrap();
        assert_eq!(id.as_str(), "legacy-entry");
        assert_eq!(id.millis(), None);
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ExpenseId::from_millis(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");
        let back: ExpenseId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_generator_uses_creation_time() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next(1000).as_str(), "1000");
        assert_eq!(ids.next(2000).as_str(), "2000");
    }

    #[test]
    fn test_generator_bumps_same_millisecond() {
        let mut ids = IdGenerator::new();
        let a = ids.next(1000);
        let b = ids.next(1000);
        let c = ids.next(999);
        assert_eq!(a.as_str(), "1000");
        assert_eq!(b.as_str(), "1001");
        assert_eq!(c.as_str(), "1002");
    }

    #[test]
    fn test_generator_skips_observed_ids() {
        let mut ids = IdGenerator::new();
        ids.observe(&ExpenseId::from_millis(5000));
        ids.observe(&ExpenseId::from("not-a-number"));
        ids.observe(&ExpenseId::from_millis(3000));
        assert_eq!(ids.next(4000).as_str(), "5001");
    }
}
