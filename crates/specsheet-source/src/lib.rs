//! Specsheet Source Adapters
//!
//! Implements the [`SourceAdapter`](specsheet_domain::traits::SourceAdapter)
//! trait for the document shapes a price list arrives in.
//!
//! # Adapters
//!
//! - [`CsvSource`]: a delimited grid exported from the spreadsheet, with
//!   pictures in a sidecar directory named by cell (`r12c1.png`)
//! - [`TextLineSource`]: text recovered from a laid-out document, one
//!   candidate spec blob per line
//! - [`MemorySource`]: rows and anchors held in memory
//!
//! Every adapter numbers rows from zero at the top of the document, header
//! rows included, so image anchors and rows share one coordinate system.
//!
//! # Examples
//!
//! ```no_run
//! use specsheet_domain::traits::SourceAdapter;
//! use specsheet_source::CsvSource;
//!
//! let source = CsvSource::new("price.csv")
//!     .with_start_row(1)
//!     .with_images_dir("price_images");
//!
//! for row in source.rows().unwrap() {
//!     println!("{:?}", row.unwrap());
//! }
//! ```

#![warn(missing_docs)]

mod anchors;
mod csv_grid;
mod memory;
mod text;

use std::path::Path;
use thiserror::Error;

pub use anchors::{parse_anchor_name, read_anchor_dir};
pub use csv_grid::CsvSource;
pub use memory::MemorySource;
pub use text::{has_unit_token, TextLineSource};

/// Errors that can occur while reading a source document
#[derive(Error, Debug)]
pub enum SourceError {
    /// Backing document missing or unreadable
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    /// Malformed delimited data
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O failure after the document was opened
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image sidecar that cannot be mapped to a cell
    #[error("Invalid image anchor: {0}")]
    InvalidAnchor(String),
}

impl SourceError {
    /// Build an `Unavailable` diagnostic that lists what is next to `path`
    pub(crate) fn unavailable(path: &Path, cause: &std::io::Error) -> Self {
        let mut message = format!("{}: {}", path.display(), cause);

        let candidates = candidate_files(path);
        if candidates.is_empty() {
            message.push_str(" (no files in directory)");
        } else {
            message.push_str(". Available files: ");
            message.push_str(&candidates.join(", "));
        }

        SourceError::Unavailable(message)
    }
}

/// Sorted names of the regular files in `path`'s parent directory
fn candidate_files(path: &Path) -> Vec<String> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut names: Vec<String> = match std::fs::read_dir(parent) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    };
    names.sort();
    names
}
