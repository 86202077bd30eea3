//! Text lines recovered from page-layout documents

use crate::SourceError;
use regex::Regex;
use specsheet_domain::traits::{RowIter, SourceAdapter};
use specsheet_domain::{ImageAnchor, RawRow};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

const PAGE_BREAK: char = '\u{c}';

/// Whether a line carries at least one unit token
///
/// Lines without one cannot yield any field and are dropped before extraction.
pub fn has_unit_token(line: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(?i)(вт|w|лм|lm|ip[0-9]{2})").unwrap());
    re.is_match(line)
}

/// UTF-8 text, one candidate spec blob per line
///
/// Form feeds (page breaks) count as line breaks. Text sources carry no
/// image anchors.
#[derive(Debug, Clone)]
pub struct TextLineSource {
    path: PathBuf,
    start_line: usize,
    skip_lines_without_units: bool,
}

impl TextLineSource {
    /// Read `path`, dropping lines without a unit token
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            start_line: 0,
            skip_lines_without_units: true,
        }
    }

    /// Skip the first `offset` lines
    pub fn with_start_line(mut self, offset: usize) -> Self {
        self.start_line = offset;
        self
    }

    /// Keep or drop lines that carry no unit token
    pub fn skip_lines_without_units(mut self, skip: bool) -> Self {
        self.skip_lines_without_units = skip;
        self
    }

    /// Path of the text file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SourceAdapter for TextLineSource {
    type Error = SourceError;

    fn rows(&self) -> Result<RowIter<'_, Self::Error>, Self::Error> {
        let file = File::open(&self.path).map_err(|e| SourceError::unavailable(&self.path, &e))?;
        debug!("Reading lines of {} from line {}", self.path.display(), self.start_line);

        let skip_unitless = self.skip_lines_without_units;
        let rows = BufReader::new(file)
            .lines()
            .flat_map(|line| match line {
                Ok(line) => line
                    .split(PAGE_BREAK)
                    .map(|part| Ok(part.to_string()))
                    .collect::<Vec<_>>(),
                Err(e) => vec![Err(SourceError::from(e))],
            })
            .enumerate()
            .skip(self.start_line)
            .filter_map(move |(index, line)| match line {
                Ok(line) if line.trim().is_empty() => None,
                Ok(line) if skip_unitless && !has_unit_token(&line) => None,
                Ok(line) => Some(Ok(RawRow::line(index, line))),
                Err(e) => Some(Err(e)),
            });

        Ok(Box::new(rows))
    }

    fn image_anchors(&self) -> Result<Vec<ImageAnchor>, Self::Error> {
        Ok(Vec::new())
    }
}
