//! Raw input rows as produced by a source adapter

/// Content of a single input row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowContent {
    /// Ordered cell values of a tabular row; blank cells are `None`
    Cells(Vec<Option<String>>),

    /// One line of text recovered from a page-layout document
    Line(String),
}

/// One input row or text line
///
/// Rows are ephemeral: the pipeline consumes each one immediately and keeps
/// only the record assembled from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// Zero-based absolute position in the source document (header rows included)
    pub index: usize,

    /// Row payload
    pub content: RowContent,
}

impl RawRow {
    /// Create a tabular row from cell values
    pub fn cells(index: usize, cells: Vec<Option<String>>) -> Self {
        Self {
            index,
            content: RowContent::Cells(cells),
        }
    }

    /// Create a text-line row
    pub fn line(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            content: RowContent::Line(text.into()),
        }
    }

    /// Get a trimmed, non-empty cell value
    ///
    /// Text lines have no columns, so this always returns `None` for them.
    ///
    /// # Examples
    ///
    /// ```
    /// use specsheet_domain::RawRow;
    ///
    /// let row = RawRow::cells(4, vec![Some("  NRG-A ".to_string()), None]);
    /// assert_eq!(row.cell(0), Some("NRG-A"));
    /// assert_eq!(row.cell(1), None);
    /// assert_eq!(row.cell(7), None);
    /// ```
    pub fn cell(&self, column: usize) -> Option<&str> {
        match &self.content {
            RowContent::Cells(cells) => cells
                .get(column)
                .and_then(|c| c.as_deref())
                .map(str::trim)
                .filter(|c| !c.is_empty()),
            RowContent::Line(_) => None,
        }
    }

    /// Number of columns in a tabular row (zero for text lines)
    pub fn width(&self) -> usize {
        match &self.content {
            RowContent::Cells(cells) => cells.len(),
            RowContent::Line(_) => 0,
        }
    }

    /// Raw values of the row, one entry per cell (a text line is a single value)
    pub fn values(&self) -> Vec<Option<String>> {
        match &self.content {
            RowContent::Cells(cells) => cells.clone(),
            RowContent::Line(line) => vec![Some(line.clone())],
        }
    }

    /// Whether any cell (or the line itself) contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        match &self.content {
            RowContent::Cells(cells) => cells
                .iter()
                .flatten()
                .any(|value| value.contains(needle)),
            RowContent::Line(line) => line.contains(needle),
        }
    }
}
