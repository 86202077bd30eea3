//! Error types for the sink

use thiserror::Error;

/// Errors that can occur while writing a catalog
///
/// An unreadable image payload is not one of them: it is logged and the
/// record is written without an image.
#[derive(Error, Debug)]
pub enum SinkError {
    /// Filesystem failure writing the catalog or an image file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image options that cannot be honored
    #[error("Image error: {0}")]
    Image(String),
}
