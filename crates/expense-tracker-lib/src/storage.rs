use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::warn;

use crate::data_structures::ExpenseRecord;
use crate::error::{Error, Result};

/// The persistence collaborator: one JSON file holding the whole collection
/// as an array of flat records. Reads are lenient (malformed entries are
/// skipped), writes replace the file wholesale.
pub struct ExpenseStorage {
    path: PathBuf,
}

impl ExpenseStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the full collection, sorted by date (newest first). An absent
    /// or empty file is an empty collection. Entries that no longer decode
    /// are skipped with a warning rather than failing the whole load.
    pub fn load(&self) -> Result<Vec<ExpenseRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let raw: Vec<Value> = serde_json::from_str(&content)?;
        let mut records = Vec::with_capacity(raw.len());
        for value in raw {
            match decode_record(value) {
                Ok(record) => records.push(record),
                Err(e) => warn!("skipping stored record: {}", e),
            }
        }

        // Stable sort, so stored order still breaks date ties
        records.sort_by(|a, b| b.date().cmp(&a.date()));
        Ok(records)
    }

    /// Rewrites the whole collection.
    pub fn save(&self, records: &[ExpenseRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

fn decode_record(value: Value) -> Result<ExpenseRecord> {
    let record: ExpenseRecord =
        serde_json::from_value(value).map_err(|e| Error::InvalidData(e.to_string()))?;

    if record.id().is_empty() {
        return Err(Error::InvalidData("record has an empty id".to_string()));
    }
    if !record.amount().is_finite() || record.amount() <= 0.0 {
        return Err(Error::InvalidData(format!(
            "record '{}' has a non-positive amount",
            record.id()
        )));
    }

    Ok(record)
}
