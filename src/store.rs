// 🗂️ Record Store
// Ordered, in-memory list of health records for one session.
//
// Records have no identity beyond their position. Insertion order is the
// source of truth; the date-sorted view is always a copy.

use tracing::debug;

use crate::errors::StoreError;
use crate::record::HealthRecord;

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<HealthRecord>,
}

impl RecordStore {
    /// Create an empty store (session start)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&HealthRecord> {
        self.records.get(index)
    }

    /// Records in insertion order
    pub fn records(&self) -> &[HealthRecord] {
        &self.records
    }

    /// Add a record to the end
    pub fn append(&mut self, record: HealthRecord) {
        self.records.push(record);
        debug!(len = self.records.len(), "record appended");
    }

    /// Remove the most recently inserted record
    pub fn remove_last(&mut self) -> Result<HealthRecord, StoreError> {
        let removed = self.records.pop().ok_or(StoreError::EmptyStore)?;
        debug!(len = self.records.len(), "last record removed");
        Ok(removed)
    }

    /// Remove the record at `index`, shifting later records down
    pub fn remove_at(&mut self, index: usize) -> Result<HealthRecord, StoreError> {
        let len = self.records.len();
        if index >= len {
            return Err(StoreError::IndexOutOfRange { index, len });
        }

        let removed = self.records.remove(index);
        debug!(index, len = self.records.len(), "record removed");
        Ok(removed)
    }

    /// Drop every record. Irreversible.
    pub fn clear(&mut self) {
        let dropped = self.records.len();
        self.records.clear();
        debug!(dropped, "store cleared");
    }

    /// Copy of the records sorted by date; ties keep insertion order
    pub fn render_view(&self) -> Vec<HealthRecord> {
        let mut view = self.records.clone();
        // sort_by_key is stable
        view.sort_by_key(|record| record.date);
        view
    }

    /// `(index, label)` pairs for the record selector, insertion order
    pub fn selector_options(&self) -> Vec<(usize, String)> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, record)| (i, record.label()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(day: u32, weight: f64) -> HealthRecord {
        let date = NaiveDate::from_ymd_opt(2024, 5, day).unwrap();
        HealthRecord::new(date, 170.0, weight, 120, 80)
    }

    fn weights(records: &[HealthRecord]) -> Vec<f64> {
        records.iter().map(|r| r.weight_kg).collect()
    }

    fn abc() -> RecordStore {
        let mut store = RecordStore::new();
        store.append(record(1, 60.0)); // A
        store.append(record(2, 61.0)); // B
        store.append(record(3, 62.0)); // C
        store
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = RecordStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.render_view().is_empty());
    }

    #[test]
    fn test_append_grows_by_one_and_appears_in_view() {
        let mut store = abc();
        let new = record(4, 70.0);
        store.append(new.clone());

        assert_eq!(store.len(), 4);
        assert!(store.render_view().contains(&new));
        assert_eq!(store.get(3), Some(&new));
    }

    #[test]
    fn test_remove_last() {
        let mut store = abc();
        let removed = store.remove_last().unwrap();

        assert_eq!(removed.weight_kg, 62.0);
        assert_eq!(weights(store.records()), vec![60.0, 61.0]);
    }

    #[test]
    fn test_remove_last_uses_insertion_order_not_date() {
        let mut store = RecordStore::new();
        store.append(record(20, 60.0));
        store.append(record(5, 61.0));

        let removed = store.remove_last().unwrap();
        assert_eq!(removed.weight_kg, 61.0);
        assert_eq!(weights(store.records()), vec![60.0]);
    }

    #[test]
    fn test_remove_last_on_empty_store() {
        let mut store = RecordStore::new();
        assert_eq!(store.remove_last(), Err(StoreError::EmptyStore));
    }

    #[test]
    fn test_remove_at_front() {
        let mut store = abc();
        store.remove_at(0).unwrap();
        assert_eq!(weights(store.records()), vec![61.0, 62.0]);
    }

    #[test]
    fn test_remove_at_middle_preserves_order() {
        let mut store = abc();
        let removed = store.remove_at(1).unwrap();

        assert_eq!(removed.weight_kg, 61.0);
        assert_eq!(weights(store.records()), vec![60.0, 62.0]);
    }

    #[test]
    fn test_remove_at_out_of_range() {
        let mut store = abc();
        assert_eq!(
            store.remove_at(3),
            Err(StoreError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(store.len(), 3);

        let mut empty = RecordStore::new();
        assert_eq!(
            empty.remove_at(0),
            Err(StoreError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn test_clear() {
        let mut store = abc();
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_render_view_sorts_by_date_without_mutating() {
        let mut store = RecordStore::new();
        store.append(record(10, 60.0));
        store.append(record(2, 61.0));
        store.append(record(7, 62.0));

        let view = store.render_view();
        assert_eq!(weights(&view), vec![61.0, 62.0, 60.0]);
        assert_eq!(weights(store.records()), vec![60.0, 61.0, 62.0]);
    }

    #[test]
    fn test_render_view_is_stable_for_equal_dates() {
        let mut store = RecordStore::new();
        store.append(record(8, 70.0));
        store.append(record(3, 60.0));
        store.append(record(8, 71.0));
        store.append(record(8, 72.0));

        let view = store.render_view();
        assert_eq!(weights(&view), vec![60.0, 70.0, 71.0, 72.0]);
    }

    #[test]
    fn test_selector_options_cover_valid_indices() {
        let store = abc();
        let options = store.selector_options();

        assert_eq!(options.len(), 3);
        assert_eq!(options[0], (0, "2024-05-01 - 60.0kg".to_string()));
        assert_eq!(options[2].0, 2);
    }
}
