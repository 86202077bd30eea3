//! Image rendering for catalog entries

use crate::error::SinkError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::ImageFormat;
use regex::Regex;
use serde::{Deserialize, Serialize};
use specsheet_domain::CatalogRecord;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// How a record's image is represented in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageMode {
    /// No images
    #[default]
    None,

    /// Written to a file next to the catalog; the entry holds the path
    File,

    /// Embedded as a base64 data URI
    Inline,

    /// Conventional URL derived from the model, whether or not a picture exists
    Url,
}

impl ImageMode {
    /// Lowercase name, as used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMode::None => "none",
            ImageMode::File => "file",
            ImageMode::Inline => "inline",
            ImageMode::Url => "url",
        }
    }
}

impl fmt::Display for ImageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(ImageMode::None),
            "file" => Ok(ImageMode::File),
            "inline" => Ok(ImageMode::Inline),
            "url" => Ok(ImageMode::Url),
            other => Err(format!(
                "Invalid image mode: {} (expected none, file, inline, or url)",
                other
            )),
        }
    }
}

/// Image settings for a sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageOptions {
    /// Representation of images in the catalog
    pub mode: ImageMode,

    /// Directory for `file` mode
    pub output_dir: PathBuf,

    /// URL prefix for `url` mode
    pub url_base: String,

    /// Re-encode every decoded image as PNG
    pub normalize_png: bool,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            mode: ImageMode::None,
            output_dir: PathBuf::from("images"),
            url_base: String::new(),
            normalize_png: true,
        }
    }
}

impl ImageOptions {
    /// Validate the options for the selected mode
    pub fn validate(&self) -> Result<(), String> {
        match self.mode {
            ImageMode::File if self.output_dir.as_os_str().is_empty() => {
                Err("file image mode requires an output directory".to_string())
            }
            ImageMode::Url if self.url_base.trim().is_empty() => {
                Err("url image mode requires a URL base".to_string())
            }
            _ => Ok(()),
        }
    }
}

/// Lowercased model with runs of non-word characters collapsed to `-`
///
/// # Examples
///
/// ```
/// use specsheet_sink::slug;
///
/// assert_eq!(slug("NRG-PRO 100/2"), "nrg-pro-100-2");
/// assert_eq!(slug("Прожектор NRG"), "прожектор-nrg");
/// ```
pub fn slug(model: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\W+").unwrap());
    re.replace_all(&model.to_lowercase(), "-").into_owned()
}

/// Model with path separators replaced, usable as a file name
fn file_stem(model: &str) -> String {
    model.replace(['/', '\\'], "-")
}

/// Image files rendered for one catalog, held in memory until committed
///
/// Every staged file gets a name no other file in the batch uses, compared
/// case-insensitively, so two models that sanitize to the same stem never
/// share a picture.
#[derive(Debug, Default)]
pub struct StagedImages {
    files: Vec<(PathBuf, Vec<u8>)>,
    taken: HashSet<String>,
}

impl StagedImages {
    /// An empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of staged files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether nothing is staged
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Destination paths, in staging order
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|(path, _)| path.as_path())
    }

    fn stage(&mut self, dir: &Path, stem: &str, extension: &str, bytes: Vec<u8>) -> PathBuf {
        let mut path = dir.join(format!("{}.{}", stem, extension));
        let mut suffix = 2;
        while !self.taken.insert(path.to_string_lossy().to_lowercase()) {
            path = dir.join(format!("{}-{}.{}", stem, suffix, extension));
            suffix += 1;
        }
        self.files.push((path.clone(), bytes));
        path
    }

    /// Write every staged file and return the paths written
    ///
    /// All files are written to temporary files first and only then renamed
    /// into place. If any step fails, files already renamed are removed
    /// again and temporaries are dropped.
    pub fn commit(self) -> Result<Vec<PathBuf>, SinkError> {
        let mut pending = Vec::with_capacity(self.files.len());
        for (path, bytes) in self.files {
            let dir = parent_dir(&path);
            fs::create_dir_all(&dir)?;
            let mut tmp = NamedTempFile::new_in(&dir)?;
            tmp.write_all(&bytes)?;
            pending.push((path, tmp));
        }

        let mut written = Vec::with_capacity(pending.len());
        for (path, tmp) in pending {
            if let Err(e) = tmp.persist(&path) {
                discard(&written);
                return Err(SinkError::Io(e.error));
            }
            debug!("Wrote image {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}

/// Directory a file will be written into
pub(crate) fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Remove files written by a run that did not complete
pub(crate) fn discard(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = fs::remove_file(path) {
            warn!("Could not remove {}: {}", path.display(), e);
        }
    }
}

/// Turns a record's image payload into the catalog's `image` value
#[derive(Debug, Clone)]
pub struct ImageRenderer {
    options: ImageOptions,
}

impl ImageRenderer {
    /// Create a renderer after validating `options`
    pub fn new(options: ImageOptions) -> Result<Self, SinkError> {
        options.validate().map_err(SinkError::Image)?;
        Ok(Self { options })
    }

    /// A renderer that drops every image
    pub fn disabled() -> Self {
        Self {
            options: ImageOptions::default(),
        }
    }

    /// Options in use
    pub fn options(&self) -> &ImageOptions {
        &self.options
    }

    /// The `image` value for `record`
    ///
    /// In `file` mode the image is added to `staged` and the returned value
    /// is the path it will have once committed. An unreadable payload logs a
    /// warning and yields `None`.
    pub fn render(&self, record: &CatalogRecord, staged: &mut StagedImages) -> Option<String> {
        match self.options.mode {
            ImageMode::None => None,
            ImageMode::Url => Some(format!(
                "{}/{}.jpg",
                self.options.url_base.trim_end_matches('/'),
                slug(&record.model)
            )),
            ImageMode::Inline => self.prepare(record).map(|(bytes, format)| {
                format!("data:{};base64,{}", format.to_mime_type(), STANDARD.encode(bytes))
            }),
            ImageMode::File => {
                let (bytes, format) = self.prepare(record)?;
                let extension = format.extensions_str().first().copied().unwrap_or("bin");
                let path = staged.stage(
                    &self.options.output_dir,
                    &file_stem(&record.model),
                    extension,
                    bytes,
                );
                Some(path.to_string_lossy().into_owned())
            }
        }
    }

    /// Decode the payload and settle on the bytes and format to emit
    fn prepare(&self, record: &CatalogRecord) -> Option<(Vec<u8>, ImageFormat)> {
        let payload = record.image.as_deref()?;

        let decoded = image::guess_format(payload).and_then(|format| {
            image::load_from_memory_with_format(payload, format).map(|img| (img, format))
        });
        let (decoded, format) = match decoded {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!("Image for '{}' could not be decoded: {}", record.model, e);
                return None;
            }
        };

        if !self.options.normalize_png {
            return Some((payload.to_vec(), format));
        }

        let mut png = Vec::new();
        match decoded.write_to(&mut Cursor::new(&mut png), ImageFormat::Png) {
            Ok(()) => Some((png, ImageFormat::Png)),
            Err(e) => {
                warn!("Image for '{}' could not be re-encoded as PNG: {}", record.model, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use specsheet_domain::ExtractedFields;
    use tempfile::TempDir;

    fn encoded(format: ImageFormat) -> Vec<u8> {
        let img = RgbImage::from_pixel(2, 2, Rgb([200, 30, 30]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    fn record_with_image(model: &str, image: Option<Vec<u8>>) -> CatalogRecord {
        let mut record = CatalogRecord::new(model, ExtractedFields::default(), "");
        record.image = image;
        record
    }

    fn renderer(mode: ImageMode) -> ImageRenderer {
        ImageRenderer::new(ImageOptions {
            mode,
            url_base: "https://example.test/images/".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_image_mode_parse() {
        assert_eq!("Inline".parse::<ImageMode>(), Ok(ImageMode::Inline));
        assert!("base64".parse::<ImageMode>().is_err());
        assert_eq!(ImageMode::Url.to_string(), "url");
    }

    #[test]
    fn test_options_validation() {
        let options = ImageOptions {
            mode: ImageMode::Url,
            ..Default::default()
        };
        assert!(options.validate().is_err());
        assert!(matches!(ImageRenderer::new(options), Err(SinkError::Image(_))));
        assert!(ImageOptions::default().validate().is_ok());
    }

    #[test]
    fn test_none_mode_drops_images() {
        let record = record_with_image("NRG-A", Some(encoded(ImageFormat::Png)));
        let mut staged = StagedImages::new();
        assert_eq!(ImageRenderer::disabled().render(&record, &mut staged), None);
        assert!(staged.is_empty());
    }

    #[test]
    fn test_url_mode_ignores_payload() {
        let record = record_with_image("NRG PRO/100", None);
        assert_eq!(
            renderer(ImageMode::Url)
                .render(&record, &mut StagedImages::new())
                .as_deref(),
            Some("https://example.test/images/nrg-pro-100.jpg")
        );
    }

    #[test]
    fn test_inline_normalizes_to_png() {
        let record = record_with_image("NRG-A", Some(encoded(ImageFormat::Jpeg)));
        let image = renderer(ImageMode::Inline)
            .render(&record, &mut StagedImages::new())
            .unwrap();
        assert!(image.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_inline_keeps_original_format() {
        let payload = encoded(ImageFormat::Jpeg);
        let record = record_with_image("NRG-A", Some(payload.clone()));
        let renderer = ImageRenderer::new(ImageOptions {
            mode: ImageMode::Inline,
            normalize_png: false,
            ..Default::default()
        })
        .unwrap();

        let image = renderer.render(&record, &mut StagedImages::new()).unwrap();
        assert_eq!(
            image,
            format!("data:image/jpeg;base64,{}", STANDARD.encode(&payload))
        );
    }

    #[test]
    fn test_corrupt_payload_yields_none() {
        let record = record_with_image("NRG-A", Some(vec![0, 1, 2, 3]));
        assert_eq!(
            renderer(ImageMode::Inline).render(&record, &mut StagedImages::new()),
            None
        );
    }

    fn file_renderer(dir: &Path) -> ImageRenderer {
        ImageRenderer::new(ImageOptions {
            mode: ImageMode::File,
            output_dir: dir.to_path_buf(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_file_mode_stages_until_commit() {
        let dir = TempDir::new().unwrap();
        let images = dir.path().join("images");
        let renderer = file_renderer(&images);
        let mut staged = StagedImages::new();

        let record = record_with_image("NRG/A", Some(encoded(ImageFormat::Png)));
        let path = renderer.render(&record, &mut staged).unwrap();
        assert!(path.ends_with("NRG-A.png"));
        assert!(!images.exists());

        let bare = record_with_image("NRG-B", None);
        assert_eq!(renderer.render(&bare, &mut staged), None);
        assert_eq!(staged.len(), 1);

        let written = staged.commit().unwrap();
        assert_eq!(written, vec![images.join("NRG-A.png")]);
        assert!(images.join("NRG-A.png").exists());
    }

    #[test]
    fn test_colliding_stems_get_distinct_files() {
        let dir = TempDir::new().unwrap();
        let renderer = file_renderer(dir.path());
        let mut staged = StagedImages::new();

        let first = record_with_image("NRG/A", Some(encoded(ImageFormat::Png)));
        let second = record_with_image("NRG-A", Some(encoded(ImageFormat::Png)));
        let third = record_with_image("nrg-a", Some(encoded(ImageFormat::Png)));

        let a = renderer.render(&first, &mut staged).unwrap();
        let b = renderer.render(&second, &mut staged).unwrap();
        let c = renderer.render(&third, &mut staged).unwrap();
        assert!(a.ends_with("NRG-A.png"));
        assert!(b.ends_with("NRG-A-2.png"));
        assert!(c.ends_with("nrg-a-3.png"));

        staged.commit().unwrap();
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 3);
    }

    #[test]
    fn test_failed_commit_removes_written_images() {
        let dir = TempDir::new().unwrap();
        let renderer = file_renderer(dir.path());
        // a directory where the second image should go makes its rename fail
        fs::create_dir(dir.path().join("NRG-B.png")).unwrap();

        let mut staged = StagedImages::new();
        for model in ["NRG-A", "NRG-B"] {
            let record = record_with_image(model, Some(encoded(ImageFormat::Png)));
            renderer.render(&record, &mut staged).unwrap();
        }

        assert!(matches!(staged.commit(), Err(SinkError::Io(_))));
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["NRG-B.png".to_string()]);
    }
}
