//! Pipeline entry point

use crate::assembler::{Assembly, RecordAssembler};
use crate::config::ExtractorConfig;
use crate::dedup::{Deduplicator, Merge};
use crate::error::ExtractorError;
use crate::fields::FieldExtractor;
use crate::locator::ImageLocator;
use crate::types::{ExtractionOutcome, LookupResult, RunStats};
use specsheet_domain::traits::{RecordSink, SourceAdapter};
use std::fmt::Display;
use std::time::Instant;
use tracing::{debug, info};

/// Runs read → extract → locate → assemble → deduplicate over a source
pub struct Pipeline {
    assembler: RecordAssembler,
    config: ExtractorConfig,
}

impl Pipeline {
    /// Validate `config` and compile the field rules
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        let extractor = FieldExtractor::new(&config.model_prefix_filter)?;

        Ok(Self {
            assembler: RecordAssembler::new(extractor, config.clone()),
            config,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract the deduplicated record collection from `source`
    ///
    /// Any source error aborts the run; nothing partial is returned.
    pub fn run<S>(&self, source: &S) -> Result<ExtractionOutcome, ExtractorError>
    where
        S: SourceAdapter,
        S::Error: Display,
    {
        let start = Instant::now();
        let mut stats = RunStats::default();

        let anchors = source
            .image_anchors()
            .map_err(|e| ExtractorError::Source(e.to_string()))?;
        let locator = ImageLocator::new(&anchors, self.config.image_column_index);
        info!(
            "Starting extraction: {} image anchors on {} rows ({} outside image column {})",
            anchors.len(),
            locator.anchored_rows(),
            locator.off_column(),
            self.config.image_column_index
        );

        let mut dedup = Deduplicator::new();
        let rows = source
            .rows()
            .map_err(|e| ExtractorError::Source(e.to_string()))?;

        for row in rows {
            let row = row.map_err(|e| ExtractorError::Source(e.to_string()))?;
            stats.rows_read += 1;

            match self.assembler.assemble(&row, &locator) {
                Assembly::Record(record) => {
                    stats.records_assembled += 1;
                    if record.image.is_some() {
                        stats.images_located += 1;
                    }
                    let model = record.model.clone();
                    if let Merge::Replaced(position) = dedup.push(record) {
                        debug!(
                            "Row {}: '{}' overwrites record at position {}",
                            row.index, model, position
                        );
                    }
                }
                Assembly::Skipped(reason) => {
                    stats.rows_skipped += 1;
                    debug!("Row {} skipped: {}", row.index, reason);
                }
            }
        }

        stats.duplicates_merged = dedup.merged();
        stats.processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "Extraction complete: {} rows read, {} skipped, {} records ({} duplicates merged, {} images)",
            stats.rows_read,
            stats.rows_skipped,
            dedup.len(),
            stats.duplicates_merged,
            stats.images_located
        );

        Ok(ExtractionOutcome {
            records: dedup.into_records(),
            stats,
        })
    }

    /// Run, then hand the finished collection to `sink`
    ///
    /// The sink is only called once the whole run has succeeded.
    pub fn run_into<S, K>(&self, source: &S, sink: &mut K) -> Result<RunStats, ExtractorError>
    where
        S: SourceAdapter,
        S::Error: Display,
        K: RecordSink,
        K::Error: Display,
    {
        let outcome = self.run(source)?;
        sink.write(&outcome.records)
            .map_err(|e| ExtractorError::Sink(e.to_string()))?;
        info!("Wrote {} records", outcome.records.len());
        Ok(outcome.stats)
    }

    /// Find the first row mentioning `model` and assemble it
    pub fn lookup<S>(&self, source: &S, model: &str) -> Result<LookupResult, ExtractorError>
    where
        S: SourceAdapter,
        S::Error: Display,
    {
        let model = model.trim();
        if model.is_empty() {
            return Err(ExtractorError::InvalidInput(
                "model must not be empty".to_string(),
            ));
        }

        let anchors = source
            .image_anchors()
            .map_err(|e| ExtractorError::Source(e.to_string()))?;
        let locator = ImageLocator::new(&anchors, self.config.image_column_index);
        let rows = source
            .rows()
            .map_err(|e| ExtractorError::Source(e.to_string()))?;

        for row in rows {
            let row = row.map_err(|e| ExtractorError::Source(e.to_string()))?;
            if row.contains(model) {
                debug!("Found '{}' at row {}", model, row.index);
                return Ok(LookupResult {
                    record: self.assembler.assemble_as(&row, &locator, model),
                    row_index: row.index,
                    cells: row.values(),
                });
            }
        }

        Err(ExtractorError::ModelNotFound(model.to_string()))
    }
}
