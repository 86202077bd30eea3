//! Sidecar image directories
//!
//! A spreadsheet export cannot carry its pictures, so they travel next to
//! it as one file per picture, named after the cell the picture was
//! anchored to: `r{row}c{col}[-suffix].{ext}`. The suffix keeps several
//! pictures in one cell apart.

use crate::SourceError;
use specsheet_domain::ImageAnchor;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parse a sidecar file stem into `(row, column)`
///
/// Returns `Ok(None)` for names outside the naming scheme and an error for
/// names that follow it but carry out-of-range numbers.
///
/// # Examples
///
/// ```
/// use specsheet_source::parse_anchor_name;
///
/// assert_eq!(parse_anchor_name("r12c1").unwrap(), Some((12, 1)));
/// assert_eq!(parse_anchor_name("r12c1-2").unwrap(), Some((12, 1)));
/// assert_eq!(parse_anchor_name("logo").unwrap(), None);
/// ```
pub fn parse_anchor_name(stem: &str) -> Result<Option<(usize, usize)>, SourceError> {
    let Some(rest) = stem.strip_prefix('r') else {
        return Ok(None);
    };
    let Some((row, rest)) = rest.split_once('c') else {
        return Ok(None);
    };
    let column = match rest.split_once('-') {
        Some((column, _suffix)) => column,
        None => rest,
    };

    if !is_number(row) || !is_number(column) {
        return Ok(None);
    }

    match (row.parse(), column.parse()) {
        (Ok(row), Ok(column)) => Ok(Some((row, column))),
        _ => Err(SourceError::InvalidAnchor(format!(
            "cell reference out of range in '{}'",
            stem
        ))),
    }
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Read every anchored image in `dir`, in file name order
pub fn read_anchor_dir(dir: &Path) -> Result<Vec<ImageAnchor>, SourceError> {
    if !dir.exists() {
        return Err(SourceError::unavailable(
            dir,
            &std::io::Error::from(std::io::ErrorKind::NotFound),
        ));
    }
    if !dir.is_dir() {
        return Err(SourceError::InvalidAnchor(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let mut entries: Vec<_> = fs::read_dir(dir)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .filter(|entry| entry.path().is_file())
        .collect();
    entries.sort_by_key(|entry| entry.file_name());

    let mut anchors = Vec::new();
    for entry in entries {
        let path = entry.path();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        match parse_anchor_name(&stem)? {
            Some((row, column)) => {
                let data = fs::read(&path)?;
                anchors.push(ImageAnchor::new(row, column, data));
            }
            None => debug!("Ignoring {} (not a cell-named image)", path.display()),
        }
    }

    debug!("Read {} image anchors from {}", anchors.len(), dir.display());
    Ok(anchors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_anchor_name() {
        assert_eq!(parse_anchor_name("r0c0").unwrap(), Some((0, 0)));
        assert_eq!(parse_anchor_name("r7c1-photo").unwrap(), Some((7, 1)));
        assert_eq!(parse_anchor_name("rc1").unwrap(), None);
        assert_eq!(parse_anchor_name("r1c").unwrap(), None);
        assert_eq!(parse_anchor_name("row1c1").unwrap(), None);
        assert_eq!(parse_anchor_name("readme").unwrap(), None);
    }

    #[test]
    fn test_parse_anchor_name_overflow() {
        let result = parse_anchor_name("r99999999999999999999999c1");
        assert!(matches!(result, Err(SourceError::InvalidAnchor(_))));
    }

    #[test]
    fn test_read_anchor_dir_in_name_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("r5c1-b.png"), [2u8]).unwrap();
        fs::write(dir.path().join("r5c1-a.png"), [1u8]).unwrap();
        fs::write(dir.path().join("r3c2.jpg"), [3u8]).unwrap();
        fs::write(dir.path().join("notes.txt"), "skip").unwrap();

        let anchors = read_anchor_dir(dir.path()).unwrap();
        let placed: Vec<(usize, usize, u8)> = anchors
            .iter()
            .map(|a| (a.row, a.column, a.data[0]))
            .collect();
        assert_eq!(placed, vec![(3, 2, 3), (5, 1, 1), (5, 1, 2)]);
    }

    #[test]
    fn test_read_anchor_dir_not_a_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("r1c1.png");
        fs::write(&file, [0u8]).unwrap();
        assert!(matches!(
            read_anchor_dir(&file),
            Err(SourceError::InvalidAnchor(_))
        ));
        assert!(matches!(
            read_anchor_dir(&dir.path().join("missing")),
            Err(SourceError::Unavailable(_))
        ));
    }
}
