//! Specsheet Sink
//!
//! Serializes the final record collection as a JSON catalog.
//!
//! Each record becomes a [`CatalogEntry`] with a fixed field order. Its
//! image payload is decoded with the `image` crate and, depending on
//! [`ImageMode`], written to a file, embedded as a data URI, replaced by a
//! conventional URL, or dropped. [`JsonFileSink`] implements
//! [`RecordSink`](specsheet_domain::traits::RecordSink) and never leaves a
//! half-written catalog behind.

#![warn(missing_docs)]

mod entry;
mod error;
mod json_file;
mod render;

pub use entry::{build_entries, render_json, CatalogEntry, DimensionsEntry};
pub use error::SinkError;
pub use json_file::JsonFileSink;
pub use render::{slug, ImageMode, ImageOptions, ImageRenderer, StagedImages};
