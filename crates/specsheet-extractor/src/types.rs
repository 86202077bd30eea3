//! Result types for extraction runs

use serde::Serialize;
use specsheet_domain::CatalogRecord;

/// Result of a full extraction run
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    /// Deduplicated records in first-occurrence order
    pub records: Vec<CatalogRecord>,

    /// Counters for the run
    pub stats: RunStats,
}

/// Counters collected during one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Rows (or lines) yielded by the source
    pub rows_read: usize,

    /// Rows that produced no record
    pub rows_skipped: usize,

    /// Records produced before deduplication
    pub records_assembled: usize,

    /// Records that received an anchored image
    pub images_located: usize,

    /// Records overwritten by a later row with the same model
    pub duplicates_merged: usize,

    /// Wall-clock duration of the run in milliseconds
    pub processing_time_ms: u64,
}

impl RunStats {
    /// Number of unique records emitted
    pub fn records_emitted(&self) -> usize {
        self.records_assembled - self.duplicates_merged
    }
}

/// Result of a single-item lookup
#[derive(Debug, Clone)]
pub struct LookupResult {
    /// Record assembled from the matching row
    pub record: CatalogRecord,

    /// Absolute position of the matching row
    pub row_index: usize,

    /// Raw values of the matching row
    pub cells: Vec<Option<String>>,
}
