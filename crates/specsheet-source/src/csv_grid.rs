//! Delimited grid source

use crate::anchors::read_anchor_dir;
use crate::SourceError;
use csv::{ReaderBuilder, StringRecord};
use specsheet_domain::traits::{RowIter, SourceAdapter};
use specsheet_domain::{ImageAnchor, RawRow};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::debug;

/// Spreadsheet grid exported as CSV, with an optional sidecar image directory
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    delimiter: u8,
    start_row: usize,
    images_dir: Option<PathBuf>,
}

impl CsvSource {
    /// Read `path` as comma-separated, starting at the top row
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
            start_row: 0,
            images_dir: None,
        }
    }

    /// Use a different field delimiter (`;` is common in Russian-locale exports)
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Skip the first `offset` rows (headers)
    pub fn with_start_row(mut self, offset: usize) -> Self {
        self.start_row = offset;
        self
    }

    /// Take image anchors from a directory of cell-named files
    pub fn with_images_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.images_dir = Some(dir.into());
        self
    }

    /// Path of the grid file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Grid row numbers for csv records
///
/// The csv reader drops blank lines, but they are still rows of the grid.
/// A record's row is the number of line breaks before its first byte, less
/// the line breaks that sat inside quoted cells of earlier records.
#[derive(Debug)]
struct RowNumbering {
    data: Rc<[u8]>,
    scanned: usize,
    line_breaks: usize,
    inside_cells: usize,
}

impl RowNumbering {
    fn new(data: Rc<[u8]>) -> Self {
        Self {
            data,
            scanned: 0,
            line_breaks: 0,
            inside_cells: 0,
        }
    }

    fn number(&mut self, record: &StringRecord) -> usize {
        let from = record
            .position()
            .map_or(self.scanned, |p| p.byte() as usize)
            .clamp(self.scanned, self.data.len());
        // blank lines and the `\n` of a CRLF are consumed with the next record
        let start = from
            + self.data[from..]
                .iter()
                .take_while(|&&b| b == b'\r' || b == b'\n')
                .count();

        self.line_breaks += self.data[self.scanned..start]
            .iter()
            .filter(|&&b| b == b'\n')
            .count();
        self.scanned = start;

        let index = self.line_breaks - self.inside_cells;
        self.inside_cells += record.iter().map(|f| f.matches('\n').count()).sum::<usize>();
        index
    }
}

impl SourceAdapter for CsvSource {
    type Error = SourceError;

    fn rows(&self) -> Result<RowIter<'_, Self::Error>, Self::Error> {
        let data: Rc<[u8]> = fs::read(&self.path)
            .map_err(|e| SourceError::unavailable(&self.path, &e))?
            .into();
        debug!("Reading grid {} from row {}", self.path.display(), self.start_row);

        let reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(Cursor::new(Rc::clone(&data)));

        let start_row = self.start_row;
        let mut numbering = RowNumbering::new(data);
        let rows = reader
            .into_records()
            .map(move |record| -> Result<RawRow, SourceError> {
                let record = record?;
                let index = numbering.number(&record);
                let cells = record
                    .iter()
                    .map(|value| {
                        if value.trim().is_empty() {
                            None
                        } else {
                            Some(value.to_string())
                        }
                    })
                    .collect();
                Ok(RawRow::cells(index, cells))
            })
            .filter(move |row| !matches!(row, Ok(row) if row.index < start_row));

        Ok(Box::new(rows))
    }

    fn image_anchors(&self) -> Result<Vec<ImageAnchor>, Self::Error> {
        match &self.images_dir {
            Some(dir) => read_anchor_dir(dir),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn collect(source: &CsvSource) -> Vec<RawRow> {
        source
            .rows()
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_blank_cells_are_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("grid.csv");
        fs::write(&path, "NRG-A, ,100W\n").unwrap();

        let rows = collect(&CsvSource::new(&path));
        assert_eq!(
            rows[0],
            RawRow::cells(
                0,
                vec![Some("NRG-A".to_string()), None, Some("100W".to_string())]
            )
        );
    }

    #[test]
    fn test_offset_keeps_absolute_index() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("grid.csv");
        fs::write(&path, "Model,Photo,Spec\nNRG-A,,50W\nNRG-B,,60W\n").unwrap();

        let rows = collect(&CsvSource::new(&path).with_start_row(1));
        let indices: Vec<usize> = rows.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2]);
    }

    #[test]
    fn test_blank_lines_still_count_as_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("grid.csv");
        fs::write(&path, "Model,Photo,Spec\n\nNRG-A,,50W\n\n\nNRG-B,,60W\n").unwrap();

        let rows = collect(&CsvSource::new(&path));
        let indices: Vec<usize> = rows.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 2, 5]);

        let rows = collect(&CsvSource::new(&path).with_start_row(1));
        assert_eq!(rows[0].index, 2);
        assert_eq!(rows[0].cell(0), Some("NRG-A"));
    }

    #[test]
    fn test_multiline_cell_is_one_row() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("grid.csv");
        fs::write(&path, "NRG-A,,\"50W\nIP65\"\r\nNRG-B,,60W\r\n").unwrap();

        let rows = collect(&CsvSource::new(&path));
        let indices: Vec<usize> = rows.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(rows[0].cell(2), Some("50W\nIP65"));
    }

    #[test]
    fn test_semicolon_and_ragged_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("grid.csv");
        fs::write(&path, "NRG-A;;50W;1500\nИтого\n").unwrap();

        let rows = collect(&CsvSource::new(&path).with_delimiter(b';'));
        assert_eq!(rows[0].width(), 4);
        assert_eq!(rows[1].width(), 1);
    }

    #[test]
    fn test_no_images_dir_means_no_anchors() {
        let source = CsvSource::new("unused.csv");
        assert!(source.image_anchors().unwrap().is_empty());
    }
}
