pub mod analytics;
pub mod data_structures;
pub mod error;
pub mod filter;
pub mod storage;
pub mod tracker;

pub use analytics::Analytics;
pub use data_structures::{
    Category, ChartSeries, ExpenseDraft, ExpenseRecord, DEFAULT_DESCRIPTION,
};
pub use error::{Error, Result};
pub use filter::FilterCriteria;
pub use storage::ExpenseStorage;
pub use tracker::ExpenseTracker;

pub use chrono::NaiveDate;

pub mod prelude {
    pub use crate::data_structures::{Category, ChartSeries, ExpenseDraft, ExpenseRecord};
    pub use crate::error::{Error, Result};
    pub use crate::filter::FilterCriteria;
    pub use crate::tracker::ExpenseTracker;
    pub use chrono::NaiveDate;
}
