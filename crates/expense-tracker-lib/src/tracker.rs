use std::collections::HashMap;
use std::path::Path;

use chrono::{NaiveDate, Utc};
use tracing::debug;

use crate::analytics::Analytics;
use crate::data_structures::{
    Category, ChartSeries, ExpenseDraft, ExpenseRecord, DEFAULT_DESCRIPTION,
};
use crate::error::{Error, Result};
use crate::filter::FilterCriteria;
use crate::storage::ExpenseStorage;

/// Owns the in-memory record list and keeps the storage file in sync: every
/// mutation validates, updates the list and rewrites the whole collection.
pub struct ExpenseTracker {
    records: Vec<ExpenseRecord>,
    storage: ExpenseStorage,
    analytics: Analytics,
}

impl ExpenseTracker {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let storage = ExpenseStorage::new(path);
        let records = storage.load()?;
        debug!(
            "loaded {} expenses from {}",
            records.len(),
            storage.path().display()
        );

        Ok(Self {
            records,
            storage,
            analytics: Analytics::new(),
        })
    }

    pub fn reload(&mut self) -> Result<()> {
        self.records = self.storage.load()?;
        Ok(())
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&ExpenseRecord> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn add(&mut self, draft: ExpenseDraft) -> Result<ExpenseRecord> {
        let description = validate(&draft)?;
        let record = ExpenseRecord::new(
            self.next_id(),
            draft.date(),
            draft.category().clone(),
            draft.amount(),
            description,
        );

        // Insert at the front so the stable sort keeps the newest insertion
        // first among records with the same date
        self.records.insert(0, record.clone());
        self.sort_records();
        self.persist()?;
        Ok(record)
    }

    pub fn update(&mut self, id: &str, draft: ExpenseDraft) -> Result<ExpenseRecord> {
        let index = self
            .records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        let description = validate(&draft)?;
        let updated = ExpenseRecord::new(
            id.to_string(),
            draft.date(),
            draft.category().clone(),
            draft.amount(),
            description,
        );

        self.records[index] = updated.clone();
        self.sort_records();
        self.persist()?;
        Ok(updated)
    }

    /// Removes the record with `id` if present. Deleting a vanished id is a
    /// no-op, not an error; the return value says whether anything was
    /// removed.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let before = self.records.len();
        self.records.retain(|record| record.id() != id);
        if self.records.len() == before {
            return Ok(false);
        }

        self.persist()?;
        Ok(true)
    }

    pub fn filtered(&self, criteria: &FilterCriteria) -> Vec<&ExpenseRecord> {
        criteria.apply(&self.records)
    }

    pub fn total_sum(&self) -> f64 {
        self.analytics.total_sum(&self.records)
    }

    pub fn current_week_sum(&self, now: NaiveDate) -> f64 {
        self.analytics.current_week_sum(&self.records, now)
    }

    pub fn current_month_sum(&self, now: NaiveDate) -> f64 {
        self.analytics.current_month_sum(&self.records, now)
    }

    pub fn category_totals(&self) -> HashMap<Category, f64> {
        self.analytics.category_totals(&self.records)
    }

    pub fn weekly_series(&self, now: NaiveDate) -> ChartSeries {
        self.analytics.weekly_series(&self.records, now)
    }

    pub fn monthly_series(&self, now: NaiveDate) -> ChartSeries {
        self.analytics.monthly_series(&self.records, now)
    }

    fn sort_records(&mut self) {
        self.records.sort_by(|a, b| b.date().cmp(&a.date()));
    }

    fn persist(&self) -> Result<()> {
        debug!(
            "persisting {} expenses to {}",
            self.records.len(),
            self.storage.path().display()
        );
        self.storage.save(&self.records)
    }

    // Ids derive from the creation clock; bump on collision so they are
    // unique even within one millisecond and never reused
    fn next_id(&self) -> String {
        let mut stamp = Utc::now().timestamp_millis();
        let mut id = stamp.to_string();
        while self.records.iter().any(|record| record.id() == id) {
            stamp += 1;
            id = stamp.to_string();
        }
        id
    }
}

fn validate(draft: &ExpenseDraft) -> Result<String> {
    if !draft.amount().is_finite() || draft.amount() <= 0.0 {
        return Err(Error::Validation(format!(
            "amount must be a positive number, got {}",
            draft.amount()
        )));
    }
    if draft.category().name().trim().is_empty() {
        return Err(Error::Validation("category must not be empty".to_string()));
    }

    let description = draft.description().trim();
    Ok(if description.is_empty() {
        DEFAULT_DESCRIPTION.to_string()
    } else {
        description.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn open_empty() -> (ExpenseTracker, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let tracker = ExpenseTracker::open(temp_file.path()).unwrap();
        (tracker, temp_file)
    }

    #[test]
    fn test_add_then_reopen_preserves_fields() {
        let (mut tracker, temp_file) = open_empty();

        let draft = ExpenseDraft::new(date(2024, 6, 1), Category::Food, 12.5, "Lunch");
        let added = tracker.add(draft).unwrap();

        let reopened = ExpenseTracker::open(temp_file.path()).unwrap();
        let loaded = reopened.get(added.id()).unwrap();
        assert_eq!(loaded.date(), date(2024, 6, 1));
        assert_eq!(loaded.category(), &Category::Food);
        assert_eq!(loaded.amount(), 12.5);
        assert_eq!(loaded.description(), "Lunch");
    }

    #[test]
    fn test_blank_description_gets_the_sentinel() {
        let (mut tracker, _temp_file) = open_empty();

        let added = tracker
            .add(ExpenseDraft::new(date(2024, 6, 1), Category::Fuel, 30.0, "   "))
            .unwrap();
        assert_eq!(added.description(), DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_add_rejects_non_positive_amounts() {
        let (mut tracker, _temp_file) = open_empty();

        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let result = tracker.add(ExpenseDraft::new(
                date(2024, 6, 1),
                Category::Food,
                amount,
                "bad",
            ));
            assert!(matches!(result, Err(Error::Validation(_))));
        }
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_records_are_sorted_newest_first_with_insertion_ties() {
        let (mut tracker, _temp_file) = open_empty();

        tracker
            .add(ExpenseDraft::new(date(2024, 6, 1), Category::Food, 1.0, "first"))
            .unwrap();
        tracker
            .add(ExpenseDraft::new(date(2024, 6, 5), Category::Food, 2.0, "newer day"))
            .unwrap();
        tracker
            .add(ExpenseDraft::new(date(2024, 6, 1), Category::Food, 3.0, "second"))
            .unwrap();

        let descriptions: Vec<&str> = tracker
            .records()
            .iter()
            .map(|r| r.description())
            .collect();
        assert_eq!(descriptions, vec!["newer day", "second", "first"]);
    }

    #[test]
    fn test_ids_are_unique_even_in_the_same_millisecond() {
        let (mut tracker, _temp_file) = open_empty();

        for i in 0..5 {
            tracker
                .add(ExpenseDraft::new(
                    date(2024, 6, 1),
                    Category::Food,
                    1.0 + f64::from(i),
                    "burst",
                ))
                .unwrap();
        }

        let mut ids: Vec<&str> = tracker.records().iter().map(|r| r.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_update_replaces_fields_and_keeps_id() {
        let (mut tracker, _temp_file) = open_empty();

        let added = tracker
            .add(ExpenseDraft::new(date(2024, 6, 1), Category::Food, 10.0, "Lunch"))
            .unwrap();

        let updated = tracker
            .update(
                added.id(),
                ExpenseDraft::new(date(2024, 6, 3), Category::Travel, 25.0, "Train"),
            )
            .unwrap();

        assert_eq!(updated.id(), added.id());
        assert_eq!(updated.category(), &Category::Travel);
        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.get(added.id()).unwrap().amount(), 25.0);
    }

    #[test]
    fn test_update_resorts_by_date() {
        let (mut tracker, _temp_file) = open_empty();

        let old = tracker
            .add(ExpenseDraft::new(date(2024, 6, 1), Category::Food, 1.0, "old"))
            .unwrap();
        tracker
            .add(ExpenseDraft::new(date(2024, 6, 5), Category::Food, 2.0, "mid"))
            .unwrap();

        tracker
            .update(
                old.id(),
                ExpenseDraft::new(date(2024, 6, 10), Category::Food, 1.0, "old moved"),
            )
            .unwrap();

        assert_eq!(tracker.records()[0].description(), "old moved");
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let (mut tracker, _temp_file) = open_empty();

        let result = tracker.update(
            "missing",
            ExpenseDraft::new(date(2024, 6, 1), Category::Food, 1.0, ""),
        );
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_invalid_update_leaves_collection_unchanged() {
        let (mut tracker, temp_file) = open_empty();

        let added = tracker
            .add(ExpenseDraft::new(date(2024, 6, 1), Category::Food, 10.0, "Lunch"))
            .unwrap();

        let result = tracker.update(
            added.id(),
            ExpenseDraft::new(date(2024, 6, 1), Category::Food, -5.0, "Lunch"),
        );
        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(tracker.get(added.id()).unwrap().amount(), 10.0);

        // The stored collection is unchanged too
        let reopened = ExpenseTracker::open(temp_file.path()).unwrap();
        assert_eq!(reopened.get(added.id()).unwrap().amount(), 10.0);
    }

    #[test]
    fn test_delete_removes_and_persists() {
        let (mut tracker, temp_file) = open_empty();

        let added = tracker
            .add(ExpenseDraft::new(date(2024, 6, 1), Category::Food, 10.0, "Lunch"))
            .unwrap();

        assert!(tracker.delete(added.id()).unwrap());
        assert!(tracker.is_empty());

        let reopened = ExpenseTracker::open(temp_file.path()).unwrap();
        assert!(reopened.is_empty());
    }

    #[test]
    fn test_delete_unknown_id_is_a_silent_no_op() {
        let (mut tracker, _temp_file) = open_empty();

        tracker
            .add(ExpenseDraft::new(date(2024, 6, 1), Category::Food, 10.0, "Lunch"))
            .unwrap();

        assert!(!tracker.delete("missing").unwrap());
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_filtered_delegates_to_criteria() {
        let (mut tracker, _temp_file) = open_empty();

        tracker
            .add(ExpenseDraft::new(date(2024, 6, 1), Category::Food, 10.0, "Lunch"))
            .unwrap();
        tracker
            .add(ExpenseDraft::new(date(2024, 6, 2), Category::Fuel, 40.0, "Gas"))
            .unwrap();

        let criteria = FilterCriteria::new().with_category(Category::Fuel);
        let matches = tracker.filtered(&criteria);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].description(), "Gas");
    }

    #[test]
    fn test_analytics_passthroughs() {
        let (mut tracker, _temp_file) = open_empty();

        tracker
            .add(ExpenseDraft::new(date(2024, 6, 10), Category::Food, 10.0, "a"))
            .unwrap();
        tracker
            .add(ExpenseDraft::new(date(2024, 6, 10), Category::Food, 5.0, "b"))
            .unwrap();

        let now = date(2024, 6, 12);
        assert_eq!(tracker.total_sum(), 15.0);
        assert_eq!(tracker.current_week_sum(now), 15.0);
        assert_eq!(tracker.current_month_sum(now), 15.0);
        assert_eq!(tracker.category_totals()[&Category::Food], 15.0);
        assert_eq!(tracker.weekly_series(now).len(), 4);
        assert_eq!(tracker.monthly_series(now).len(), 6);
    }
}
