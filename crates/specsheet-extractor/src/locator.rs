//! Structural image lookup by (row, column) anchor

use specsheet_domain::ImageAnchor;
use std::collections::HashMap;

/// Find the first anchor (in discovery order) sitting at `row` in the image column
///
/// Later anchors in the same cell are ignored.
pub fn locate(anchors: &[ImageAnchor], row: usize, image_column: usize) -> Option<&ImageAnchor> {
    anchors.iter().find(|anchor| anchor.is_at(row, image_column))
}

/// Row-indexed view over a run's anchors
///
/// Built once per run so each row lookup is a hash probe instead of a scan.
/// Answers exactly what [`locate`] would.
pub struct ImageLocator<'a> {
    anchors: &'a [ImageAnchor],
    first_by_row: HashMap<usize, usize>,
    image_column: usize,
}

impl<'a> ImageLocator<'a> {
    /// Index `anchors` for the given image column
    pub fn new(anchors: &'a [ImageAnchor], image_column: usize) -> Self {
        let mut first_by_row = HashMap::new();
        for (position, anchor) in anchors.iter().enumerate() {
            if anchor.column == image_column {
                first_by_row.entry(anchor.row).or_insert(position);
            }
        }

        Self {
            anchors,
            first_by_row,
            image_column,
        }
    }

    /// An empty locator, for sources without images
    pub fn empty(image_column: usize) -> Self {
        Self::new(&[], image_column)
    }

    /// First anchor for `row`, if any
    pub fn locate(&self, row: usize) -> Option<&'a ImageAnchor> {
        self.first_by_row
            .get(&row)
            .map(|&position| &self.anchors[position])
    }

    /// Number of rows that have an image in the image column
    pub fn anchored_rows(&self) -> usize {
        self.first_by_row.len()
    }

    /// Anchors that sit outside the image column and will never be used
    pub fn off_column(&self) -> usize {
        self.anchors
            .iter()
            .filter(|anchor| anchor.column != self.image_column)
            .count()
    }
}
