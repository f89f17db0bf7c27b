use chrono::NaiveDate;

use crate::data_structures::{Category, ExpenseRecord};

/// Optional constraints applied to the record list for display. Absent
/// criteria act as wildcards; all present criteria must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    category: Option<Category>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_date_from(mut self, date_from: NaiveDate) -> Self {
        self.date_from = Some(date_from);
        self
    }

    pub fn with_date_to(mut self, date_to: NaiveDate) -> Self {
        self.date_to = Some(date_to);
        self
    }

    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    pub fn date_from(&self) -> Option<NaiveDate> {
        self.date_from
    }

    pub fn date_to(&self) -> Option<NaiveDate> {
        self.date_to
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.category = category;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.date_from.is_none() && self.date_to.is_none()
    }

    pub fn matches(&self, record: &ExpenseRecord) -> bool {
        let category_ok = self
            .category
            .as_ref()
            .map_or(true, |category| category == record.category());
        let from_ok = self.date_from.map_or(true, |from| record.date() >= from);
        let to_ok = self.date_to.map_or(true, |to| record.date() <= to);

        category_ok && from_ok && to_ok
    }

    /// Matching subset of `records`, preserving their relative order.
    pub fn apply<'a>(&self, records: &'a [ExpenseRecord]) -> Vec<&'a ExpenseRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, date: (i32, u32, u32), category: Category) -> ExpenseRecord {
        ExpenseRecord::new(
            id.to_string(),
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            category,
            10.0,
            "test".to_string(),
        )
    }

    fn sample_records() -> Vec<ExpenseRecord> {
        vec![
            record("1", (2024, 6, 10), Category::Food),
            record("2", (2024, 6, 5), Category::Fuel),
            record("3", (2024, 5, 28), Category::Food),
            record("4", (2024, 4, 1), Category::Travel),
        ]
    }

    #[test]
    fn test_empty_criteria_returns_all_in_order() {
        let records = sample_records();
        let criteria = FilterCriteria::new();
        assert!(criteria.is_empty());

        let filtered = criteria.apply(&records);
        assert_eq!(filtered.len(), records.len());
        let ids: Vec<&str> = filtered.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_category_filter() {
        let records = sample_records();
        let criteria = FilterCriteria::new().with_category(Category::Food);

        let ids: Vec<&str> = criteria.apply(&records).iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let records = sample_records();
        let criteria = FilterCriteria::new()
            .with_date_from(NaiveDate::from_ymd_opt(2024, 5, 28).unwrap())
            .with_date_to(NaiveDate::from_ymd_opt(2024, 6, 5).unwrap());

        let ids: Vec<&str> = criteria.apply(&records).iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn test_all_criteria_are_anded() {
        let records = sample_records();
        let criteria = FilterCriteria::new()
            .with_category(Category::Food)
            .with_date_from(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());

        let ids: Vec<&str> = criteria.apply(&records).iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["1"]);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let records = sample_records();
        let criteria = FilterCriteria::new().with_category(Category::Food);

        let once: Vec<ExpenseRecord> = criteria
            .apply(&records)
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<&ExpenseRecord> = criteria.apply(&once);
        assert_eq!(once.len(), twice.len());
        assert!(once.iter().zip(twice).all(|(a, b)| &a == &b));
    }

    #[test]
    fn test_unrecognized_category_matches_by_literal() {
        let records = vec![record(
            "9",
            (2024, 6, 1),
            Category::Unrecognized("misc".to_string()),
        )];
        let criteria =
            FilterCriteria::new().with_category(Category::Unrecognized("misc".to_string()));
        assert_eq!(criteria.apply(&records).len(), 1);

        let other = FilterCriteria::new().with_category(Category::Other);
        assert!(other.apply(&records).is_empty());
    }
}
