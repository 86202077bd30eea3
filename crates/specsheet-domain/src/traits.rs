//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the extraction core and the
//! document I/O around it. Implementations live in other crates.

use crate::{CatalogRecord, ImageAnchor, RawRow};

/// Boxed lazy row sequence returned by a [`SourceAdapter`]
pub type RowIter<'a, E> = Box<dyn Iterator<Item = Result<RawRow, E>> + 'a>;

/// Trait for reading rows and image anchors out of a document
///
/// Implemented by the infrastructure layer (specsheet-source)
pub trait SourceAdapter {
    /// Error type for source operations
    type Error;

    /// Start a fresh pass over the rows, in document order, from the configured offset
    ///
    /// Each call restarts the sequence. Any handle opened for the pass is
    /// owned by the returned iterator and released when it is dropped.
    fn rows(&self) -> Result<RowIter<'_, Self::Error>, Self::Error>;

    /// All image anchors in discovery order
    ///
    /// Independent of row iteration; sources without images return an empty list.
    fn image_anchors(&self) -> Result<Vec<ImageAnchor>, Self::Error>;
}

/// Trait for writing the final record collection
///
/// Implemented by the infrastructure layer (specsheet-sink)
pub trait RecordSink {
    /// Error type for sink operations
    type Error;

    /// Write the complete, deduplicated collection in order
    fn write(&mut self, records: &[CatalogRecord]) -> Result<(), Self::Error>;
}
