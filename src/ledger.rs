// 📒 Ledger - Exclusive owner of the expense collection
//
// The only component allowed to mutate records. Keeps insertion order;
// display order is the projector's business (see projector.rs).

use crate::category::Category;
use crate::expense::{ExpenseId, ExpenseRecord};
use crate::validation::{check_amount, ValidationError};
use chrono::{NaiveDate, Utc};
use std::ops::Deref;
use tracing::debug;

// ============================================================================
// SNAPSHOT
// ============================================================================

/// Owned, insertion-ordered copy of the ledger contents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot(Vec<ExpenseRecord>);

impl Snapshot {
    pub fn into_vec(self) -> Vec<ExpenseRecord> {
        self.0
    }
}

impl Deref for Snapshot {
    type Target = [ExpenseRecord];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for Snapshot {
    type Item = ExpenseRecord;
    type IntoIter = std::vec::IntoIter<ExpenseRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a ExpenseRecord;
    type IntoIter = std::slice::Iter<'a, ExpenseRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ============================================================================
// LEDGER
// ============================================================================

#[derive(Debug, Default)]
pub struct Ledger {
    records: Vec<ExpenseRecord>,
    /// Last id handed out; ids never go backwards, even across `clear`
    last_id: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new record and return it
    ///
    /// The description is trimmed; amount must be finite and > 0.
    pub fn add(
        &mut self,
        description: &str,
        amount: f64,
        category: Category,
        date: NaiveDate,
    ) -> Result<ExpenseRecord, ValidationError> {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        self.add_at(now, description, amount, category, date)
    }

    fn add_at(
        &mut self,
        now_millis: u64,
        description: &str,
        amount: f64,
        category: Category,
        date: NaiveDate,
    ) -> Result<ExpenseRecord, ValidationError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ValidationError::MissingField { field: "description" });
        }
        check_amount(amount)?;

        let id = self.next_id(now_millis);
        let record = ExpenseRecord::new(id, description.to_string(), amount, category, date);
        self.records.push(record.clone());

        debug!(id = %id, category = %category, amount, "expense added");
        Ok(record)
    }

    fn next_id(&mut self, now_millis: u64) -> ExpenseId {
        let id = if now_millis > self.last_id {
            now_millis
        } else {
            self.last_id + 1
        };
        self.last_id = id;
        ExpenseId(id)
    }

    /// Remove the record with `id`; `false` if there was none
    pub fn remove_by_id(&mut self, id: ExpenseId) -> bool {
        match self.records.iter().position(|r| r.id() == id) {
            Some(index) => {
                self.records.remove(index);
                debug!(id = %id, remaining = self.records.len(), "expense removed");
                true
            }
            None => {
                debug!(id = %id, "remove ignored, no such expense");
                false
            }
        }
    }

    /// Remove everything, returning how many records were dropped
    pub fn clear(&mut self) -> usize {
        let removed = self.records.len();
        self.records.clear();
        debug!(removed, "ledger cleared");
        removed
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot(self.records.clone())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_echoes_inputs() {
        let mut ledger = Ledger::new();
        let record = ledger
            .add("Lunch", 250.0, Category::Food, date(2024, 5, 1))
            .unwrap();

        assert_eq!(ledger.len(), 1);
        assert_eq!(record.description(), "Lunch");
        assert_eq!(record.amount(), 250.0);
        assert_eq!(record.category(), Category::Food);
        assert_eq!(record.date(), date(2024, 5, 1));
        assert_eq!(record.emoji(), Category::Food.emoji());
    }

    #[test]
    fn test_add_trims_description() {
        let mut ledger = Ledger::new();
        let record = ledger
            .add("  Bus pass \t", 50.0, Category::Transport, date(2024, 5, 2))
            .unwrap();
        assert_eq!(record.description(), "Bus pass");
    }

    #[test]
    fn test_add_rejects_non_positive_amount() {
        let mut ledger = Ledger::new();
        ledger.add("Seed", 1.0, Category::Other, date(2024, 1, 1)).unwrap();

        for amount in [0.0, -0.01, -250.0] {
            let err = ledger
                .add("Bad", amount, Category::Other, date(2024, 1, 1))
                .unwrap_err();
            assert!(matches!(err, ValidationError::NonPositiveAmount { .. }));
            assert_eq!(ledger.len(), 1);
        }
    }

    #[test]
    fn test_add_rejects_non_finite_amount() {
        let mut ledger = Ledger::new();
        for amount in [f64::NAN, f64::INFINITY] {
            let err = ledger
                .add("Bad", amount, Category::Other, date(2024, 1, 1))
                .unwrap_err();
            assert!(matches!(err, ValidationError::InvalidAmount { .. }));
        }
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_add_rejects_blank_description() {
        let mut ledger = Ledger::new();
        let err = ledger
            .add("   ", 10.0, Category::Other, date(2024, 1, 1))
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: "description" });
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_ids_are_timestamp_derived_and_monotonic() {
        let mut ledger = Ledger::new();
        let d = date(2024, 5, 1);

        let a = ledger.add_at(1_000, "a", 1.0, Category::Food, d).unwrap();
        // Same millisecond twice, then a clock that went backwards
        let b = ledger.add_at(1_000, "b", 1.0, Category::Food, d).unwrap();
        let c = ledger.add_at(900, "c", 1.0, Category::Food, d).unwrap();
        let e = ledger.add_at(5_000, "e", 1.0, Category::Food, d).unwrap();

        assert_eq!(a.id(), ExpenseId(1_000));
        assert_eq!(b.id(), ExpenseId(1_001));
        assert_eq!(c.id(), ExpenseId(1_002));
        assert_eq!(e.id(), ExpenseId(5_000));
    }

    #[test]
    fn test_ids_unique_under_rapid_adds() {
        let mut ledger = Ledger::new();
        for i in 0..200 {
            ledger
                .add(&format!("item {}", i), 1.0, Category::Other, date(2024, 1, 1))
                .unwrap();
        }
        let ids: HashSet<ExpenseId> = ledger.snapshot().iter().map(|r| r.id()).collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn test_ids_not_reused_after_clear() {
        let mut ledger = Ledger::new();
        let d = date(2024, 5, 1);
        let first = ledger.add_at(2_000, "a", 1.0, Category::Food, d).unwrap();
        ledger.clear();
        let second = ledger.add_at(2_000, "b", 1.0, Category::Food, d).unwrap();
        assert!(second.id() > first.id());
    }

    #[test]
    fn test_remove_by_id_preserves_order() {
        let mut ledger = Ledger::new();
        let d = date(2024, 5, 1);
        let a = ledger.add("a", 1.0, Category::Food, d).unwrap();
        let b = ledger.add("b", 2.0, Category::Food, d).unwrap();
        let c = ledger.add("c", 3.0, Category::Food, d).unwrap();

        assert!(ledger.remove_by_id(b.id()));

        let remaining: Vec<ExpenseId> = ledger.snapshot().iter().map(|r| r.id()).collect();
        assert_eq!(remaining, vec![a.id(), c.id()]);
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let mut ledger = Ledger::new();
        ledger.add("a", 1.0, Category::Food, date(2024, 5, 1)).unwrap();

        let before = ledger.snapshot();
        assert!(!ledger.remove_by_id(ExpenseId(42)));
        let after = ledger.snapshot();

        assert_eq!(before, after);
    }

    #[test]
    fn test_clear_returns_count_then_zero() {
        let mut ledger = Ledger::new();
        for i in 0..3 {
            ledger
                .add(&format!("{}", i), 1.0, Category::Other, date(2024, 1, 1))
                .unwrap();
        }

        assert_eq!(ledger.clear(), 3);
        assert!(ledger.is_empty());
        assert_eq!(ledger.clear(), 0);
    }

    #[test]
    fn test_snapshot_is_detached_from_ledger() {
        let mut ledger = Ledger::new();
        ledger.add("a", 1.0, Category::Food, date(2024, 5, 1)).unwrap();

        let mut copy = ledger.snapshot().into_vec();
        copy.clear();

        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_snapshot_keeps_insertion_order() {
        let mut ledger = Ledger::new();
        ledger.add("older date", 1.0, Category::Food, date(2024, 1, 1)).unwrap();
        ledger.add("newer date", 1.0, Category::Food, date(2024, 12, 1)).unwrap();
        ledger.add("middle", 1.0, Category::Food, date(2024, 6, 1)).unwrap();

        let snapshot = ledger.snapshot();
        let names: Vec<&str> = snapshot.iter().map(|r| r.description()).collect();
        assert_eq!(names, vec!["older date", "newer date", "middle"]);
    }
}
