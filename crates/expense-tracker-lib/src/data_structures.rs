use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Sentinel stored when an expense is submitted without a description.
pub const DEFAULT_DESCRIPTION: &str = "No description";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Fuel,
    Food,
    Travel,
    Utilities,
    Entertainment,
    Shopping,
    Other,
    /// Anything outside the fixed set, preserved exactly as stored.
    Unrecognized(String),
}

impl Category {
    pub const FIXED: [Category; 7] = [
        Category::Fuel,
        Category::Food,
        Category::Travel,
        Category::Utilities,
        Category::Entertainment,
        Category::Shopping,
        Category::Other,
    ];

    pub fn name(&self) -> &str {
        match self {
            Category::Fuel => "fuel",
            Category::Food => "food",
            Category::Travel => "travel",
            Category::Utilities => "utilities",
            Category::Entertainment => "entertainment",
            Category::Shopping => "shopping",
            Category::Other => "other",
            Category::Unrecognized(name) => name,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Category::Unrecognized(_))
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.as_str() {
            "fuel" => Category::Fuel,
            "food" => Category::Food,
            "travel" => Category::Travel,
            "utilities" => Category::Utilities,
            "entertainment" => Category::Entertainment,
            "shopping" => Category::Shopping,
            "other" => Category::Other,
            _ => Category::Unrecognized(value),
        }
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.name().to_string()
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::Validation("category must not be empty".to_string()));
        }
        Ok(Category::from(trimmed.to_ascii_lowercase()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    id: String,
    date: NaiveDate,
    category: Category,
    amount: f64,
    description: String,
}

impl ExpenseRecord {
    pub fn new(
        id: String,
        date: NaiveDate,
        category: Category,
        amount: f64,
        description: String,
    ) -> Self {
        Self {
            id,
            date,
            category,
            amount,
            description,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// The mutable fields of an expense, as submitted by add/edit before
/// validation. The id is never part of a draft.
#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    date: NaiveDate,
    category: Category,
    amount: f64,
    description: String,
}

impl ExpenseDraft {
    pub fn new<S: Into<String>>(
        date: NaiveDate,
        category: Category,
        amount: f64,
        description: S,
    ) -> Self {
        Self {
            date,
            category,
            amount,
            description: description.into(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Label/value pairs ready for chart rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl ChartSeries {
    pub fn new(labels: Vec<String>, values: Vec<f64>) -> Self {
        debug_assert_eq!(labels.len(), values.len());
        Self { labels, values }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
