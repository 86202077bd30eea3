//! Key-based merging of duplicate records
//!
//! Position comes from the first occurrence of a `model`, values from the
//! last one. Records must be pushed in arrival order; the merge result
//! depends on it.

use specsheet_domain::CatalogRecord;
use std::collections::HashMap;

/// What happened to a pushed record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Merge {
    /// First occurrence of the key, appended at this position
    Inserted(usize),

    /// Repeated key, values overwritten at the original position
    Replaced(usize),
}

/// Insertion-ordered record collection keyed by `model`
#[derive(Debug, Default)]
pub struct Deduplicator {
    records: Vec<CatalogRecord>,
    positions: HashMap<String, usize>,
    merged: usize,
}

impl Deduplicator {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record, overwriting an earlier one with the same key in place
    pub fn push(&mut self, record: CatalogRecord) -> Merge {
        match self.positions.get(&record.model) {
            Some(&position) => {
                self.records[position] = record;
                self.merged += 1;
                Merge::Replaced(position)
            }
            None => {
                let position = self.records.len();
                self.positions.insert(record.model.clone(), position);
                self.records.push(record);
                Merge::Inserted(position)
            }
        }
    }

    /// Number of unique keys
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been pushed
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of pushes that overwrote an existing record
    pub fn merged(&self) -> usize {
        self.merged
    }

    /// The final collection in first-occurrence order
    pub fn into_records(self) -> Vec<CatalogRecord> {
        self.records
    }
}

/// Deduplicate a whole sequence at once
pub fn deduplicate(records: impl IntoIterator<Item = CatalogRecord>) -> Vec<CatalogRecord> {
    let mut dedup = Deduplicator::new();
    for record in records {
        dedup.push(record);
    }
    dedup.into_records()
}
