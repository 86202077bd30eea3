//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Source document missing, unreadable, or corrupt
    #[error("Source unavailable: {0}")]
    Source(String),

    /// Sink failed to write the finished collection
    #[error("Sink error: {0}")]
    Sink(String),

    /// Single-item lookup found no matching row
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Invalid request arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A field pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(String),
}

impl From<regex::Error> for ExtractorError {
    fn from(e: regex::Error) -> Self {
        ExtractorError::Pattern(e.to_string())
    }
}
