//! Image anchors - embedded images with structural placement

/// One embedded image with its (row, column) anchor
///
/// Only structural placement is recorded; pixel geometry is never consulted.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageAnchor {
    /// Zero-based row the image is anchored to
    pub row: usize,

    /// Zero-based column the image is anchored to
    pub column: usize,

    /// Encoded image payload as stored in the document
    pub data: Vec<u8>,
}

impl ImageAnchor {
    /// Create a new anchor
    pub fn new(row: usize, column: usize, data: Vec<u8>) -> Self {
        Self { row, column, data }
    }

    /// Whether this anchor sits in the given cell
    pub fn is_at(&self, row: usize, column: usize) -> bool {
        self.row == row && self.column == column
    }
}

// Payloads can be large; print their size instead of the bytes.
impl std::fmt::Debug for ImageAnchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageAnchor")
            .field("row", &self.row)
            .field("column", &self.column)
            .field("bytes", &self.data.len())
            .finish()
    }
}
