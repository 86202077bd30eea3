//! Catalog file sink

use crate::entry::{build_entries, render_json};
use crate::error::SinkError;
use crate::render::{discard, parent_dir, ImageRenderer, StagedImages};
use specsheet_domain::traits::RecordSink;
use specsheet_domain::CatalogRecord;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// Writes the catalog as a JSON file, replacing any previous one atomically
///
/// Entries and images are rendered in memory first. The catalog goes to a
/// temporary file in the destination directory, image files are committed,
/// and only then is the catalog renamed into place. A failure at any step
/// leaves neither a new catalog nor new image files.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
    renderer: ImageRenderer,
}

impl JsonFileSink {
    /// Write to `path`, rendering images with `renderer`
    pub fn new(path: impl Into<PathBuf>, renderer: ImageRenderer) -> Self {
        Self {
            path: path.into(),
            renderer,
        }
    }

    /// Destination path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for JsonFileSink {
    type Error = SinkError;

    fn write(&mut self, records: &[CatalogRecord]) -> Result<(), Self::Error> {
        let mut staged = StagedImages::new();
        let entries = build_entries(records, &self.renderer, &mut staged);
        let json = render_json(&entries)?;

        let dir = parent_dir(&self.path);
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.flush()?;

        let images = staged.commit()?;
        if let Err(e) = tmp.persist(&self.path) {
            discard(&images);
            return Err(SinkError::Io(e.error));
        }

        info!(
            "Catalog written to {} ({} records, {} image files)",
            self.path.display(),
            records.len(),
            images.len()
        );
        Ok(())
    }
}
