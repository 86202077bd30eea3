//! Specsheet Domain Layer
//!
//! This crate contains the domain model for the catalog extraction pipeline.
//! It has ZERO external dependencies and defines the value types and trait
//! interfaces that every other crate in the workspace depends upon.
//!
//! ## Key Concepts
//!
//! - **RawRow**: one spreadsheet row or one recovered text line, consumed immediately
//! - **ImageAnchor**: an embedded image placed at a structural (row, column) cell
//! - **ExtractedFields**: typed attributes parsed out of a free-text spec blob
//! - **CatalogRecord**: the canonical product entry, keyed by `model`
//! - **Category**: the fixed product category vocabulary
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Source adapters and sinks live in other crates and implement the traits in [`traits`]
//! - Row and anchor indices are zero-based absolute document positions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod anchor;
pub mod category;
pub mod record;
pub mod row;
pub mod traits;

// Re-exports for convenience
pub use anchor::ImageAnchor;
pub use category::Category;
pub use record::{CatalogRecord, Dimensions, ExtractedFields};
pub use row::{RawRow, RowContent};
