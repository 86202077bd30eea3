//! Specsheet Extractor
//!
//! Turns loosely structured price-list rows into canonical catalog records.
//!
//! # Overview
//!
//! A price list arrives either as a spreadsheet grid (one product per row,
//! with pictures dropped into a cell) or as lines of text recovered from a
//! laid-out document. The Extractor reads the rows from a
//! [`SourceAdapter`](specsheet_domain::traits::SourceAdapter), pulls typed
//! attributes out of the free-text spec cells, attaches the picture anchored
//! to each row, and merges rows that describe the same model.
//!
//! # Architecture
//!
//! ```text
//! Source → {FieldExtractor, ImageLocator} → RecordAssembler → Deduplicator → Sink
//! ```
//!
//! # Key Features
//!
//! - **Field Extraction**: power, luminous flux, IP rating, category,
//!   dimensions, weight, warranty, and model, each independently optional
//! - **Bilingual Units**: Russian and English unit tokens in any case
//! - **Image Location**: first image anchored at (row, image column)
//! - **Deduplication**: position of the first occurrence, values of the last
//! - **Lookup**: assemble the single row that mentions a given model
//!
//! # Example Usage
//!
//! ```
//! use specsheet_domain::RawRow;
//! use specsheet_extractor::{ExtractorConfig, Pipeline};
//! use specsheet_source::MemorySource;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = MemorySource::new(vec![RawRow::cells(
//!     1,
//!     vec![
//!         Some("NRG-PRO-100".to_string()),
//!         Some("industrial light".to_string()),
//!         Some("100W 12000lm IP65".to_string()),
//!     ],
//! )]);
//!
//! let pipeline = Pipeline::new(ExtractorConfig::default())?;
//! let outcome = pipeline.run(&source)?;
//!
//! assert_eq!(outcome.records.len(), 1);
//! assert_eq!(outcome.records[0].fields.power_w, Some(100));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]

mod error;
mod config;
mod types;
mod fields;
mod locator;
mod assembler;
mod dedup;
mod pipeline;


pub use error::ExtractorError;
pub use config::ExtractorConfig;
pub use types::{ExtractionOutcome, LookupResult, RunStats};
pub use fields::FieldExtractor;
pub use locator::{locate, ImageLocator};
pub use assembler::{Assembly, RecordAssembler, SkipReason};
pub use dedup::{deduplicate, Deduplicator, Merge};
pub use pipeline::Pipeline;
