use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::data_structures::{Category, ChartSeries, ExpenseRecord};

pub const WEEKLY_BUCKETS: usize = 4;
pub const MONTHLY_BUCKETS: usize = 6;

/// Pure aggregation over expense records. Every time-dependent computation
/// takes the reference date explicitly so results never depend on the wall
/// clock.
pub struct Analytics;

impl Analytics {
    pub fn new() -> Self {
        Self
    }

    pub fn total_sum(&self, records: &[ExpenseRecord]) -> f64 {
        records.iter().map(|record| record.amount()).sum()
    }

    /// Sum over `[most recent Sunday, now]`, both ends inclusive. When `now`
    /// is itself a Sunday the week starts on `now`.
    pub fn current_week_sum(&self, records: &[ExpenseRecord], now: NaiveDate) -> f64 {
        self.sum_between(records, start_of_week(now), now)
    }

    pub fn current_month_sum(&self, records: &[ExpenseRecord], now: NaiveDate) -> f64 {
        self.sum_between(records, now.with_day(1).unwrap(), now)
    }

    /// Per-category sums. Categories with no records are omitted;
    /// unrecognized categories are keyed by their literal name.
    pub fn category_totals(&self, records: &[ExpenseRecord]) -> HashMap<Category, f64> {
        let mut totals = HashMap::new();
        for record in records {
            *totals.entry(record.category().clone()).or_insert(0.0) += record.amount();
        }
        totals
    }

    /// Totals for the last four Sunday-aligned weeks, oldest bucket first.
    /// Buckets exist independently of the data, so the series always has
    /// exactly four entries.
    pub fn weekly_series(&self, records: &[ExpenseRecord], now: NaiveDate) -> ChartSeries {
        let week_start = start_of_week(now);
        let mut labels = Vec::with_capacity(WEEKLY_BUCKETS);
        let mut values = Vec::with_capacity(WEEKLY_BUCKETS);

        for weeks_back in (0..WEEKLY_BUCKETS as i64).rev() {
            let bucket_start = week_start - Duration::days(7 * weeks_back);
            let bucket_end = bucket_start + Duration::days(6);
            let weeks_ago = (now - bucket_start).num_days() / 7 + 1;

            labels.push(format!("Week {}", weeks_ago));
            values.push(self.sum_between(records, bucket_start, bucket_end));
        }

        ChartSeries::new(labels, values)
    }

    /// Totals for the last six calendar months, oldest bucket first. Each
    /// bucket spans its whole month; the series always has exactly six
    /// entries.
    pub fn monthly_series(&self, records: &[ExpenseRecord], now: NaiveDate) -> ChartSeries {
        let mut labels = Vec::with_capacity(MONTHLY_BUCKETS);
        let mut values = Vec::with_capacity(MONTHLY_BUCKETS);

        for months_back in (0..MONTHLY_BUCKETS as i32).rev() {
            let bucket_start = month_start_back(now, months_back);
            let bucket_end = month_start_back(bucket_start, -1) - Duration::days(1);

            labels.push(bucket_start.format("%b %Y").to_string());
            values.push(self.sum_between(records, bucket_start, bucket_end));
        }

        ChartSeries::new(labels, values)
    }

    fn sum_between(&self, records: &[ExpenseRecord], from: NaiveDate, to: NaiveDate) -> f64 {
        records
            .iter()
            .filter(|record| record.date() >= from && record.date() <= to)
            .map(|record| record.amount())
            .sum()
    }
}

impl Default for Analytics {
    fn default() -> Self {
        Self::new()
    }
}

fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// First day of the calendar month `months` before `date`'s month. Negative
/// `months` walks forward.
fn month_start_back(date: NaiveDate, months: i32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 - months;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}
