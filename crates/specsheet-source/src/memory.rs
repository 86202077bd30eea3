//! In-memory source

use crate::SourceError;
use specsheet_domain::traits::{RowIter, SourceAdapter};
use specsheet_domain::{ImageAnchor, RawRow};

/// Rows and anchors already in memory
///
/// Rows are yielded as given; their indices are taken at face value.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    rows: Vec<RawRow>,
    anchors: Vec<ImageAnchor>,
}

impl MemorySource {
    /// Create a source over `rows` with no images
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self {
            rows,
            anchors: Vec::new(),
        }
    }

    /// Attach image anchors, in discovery order
    pub fn with_anchors(mut self, anchors: Vec<ImageAnchor>) -> Self {
        self.anchors = anchors;
        self
    }

    /// Number of rows held
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the source holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl SourceAdapter for MemorySource {
    type Error = SourceError;

    fn rows(&self) -> Result<RowIter<'_, Self::Error>, Self::Error> {
        Ok(Box::new(self.rows.iter().cloned().map(Ok::<RawRow, SourceError>)))
    }

    fn image_anchors(&self) -> Result<Vec<ImageAnchor>, Self::Error> {
        Ok(self.anchors.clone())
    }
}
