//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Column layout and extraction settings for one kind of price list
///
/// Passed explicitly into [`crate::Pipeline::new`]; nothing is read from
/// process-wide state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Header rows (or lines) the source skips before yielding data
    pub start_row_offset: usize,

    /// Column holding the model identifier
    pub model_column: usize,

    /// Column holding a display name distinct from the model
    pub name_column: Option<usize>,

    /// Columns joined (in this order) into the spec blob
    pub spec_columns: Vec<usize>,

    /// Column treated as the image slot when matching anchors
    pub image_column_index: usize,

    /// Brand token that identifies model cells and model tokens in text
    pub model_prefix_filter: String,

    /// Discard tabular rows whose identifier does not contain the brand token
    pub require_model_prefix: bool,

    /// Maximum characters kept in a record's raw preview
    pub raw_preview_length: usize,

    /// Column holding the retail price
    pub price_retail_column: Option<usize>,

    /// Column holding the wholesale price
    pub price_wholesale_column: Option<usize>,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model_prefix_filter.trim().is_empty() {
            return Err("model_prefix_filter must not be empty".to_string());
        }
        if self.model_prefix_filter.chars().any(char::is_whitespace) {
            return Err("model_prefix_filter must be a single token".to_string());
        }
        if self.raw_preview_length == 0 {
            return Err("raw_preview_length must be greater than 0".to_string());
        }
        if self.spec_columns.is_empty() {
            return Err("spec_columns must name at least one column".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Simple grid: one header row, model in A, image slot in B, spec text in B and C
    fn default() -> Self {
        Self {
            start_row_offset: 1,
            model_column: 0,
            name_column: None,
            spec_columns: vec![1, 2],
            image_column_index: 1,
            model_prefix_filter: "NRG".to_string(),
            require_model_prefix: true,
            raw_preview_length: 200,
            price_retail_column: None,
            price_wholesale_column: None,
        }
    }
}

impl ExtractorConfig {
    /// Price-list preset: four header rows, picture in B, description in C, prices in D and E
    pub fn price_list() -> Self {
        Self {
            start_row_offset: 4,
            model_column: 0,
            name_column: None,
            spec_columns: vec![2],
            image_column_index: 1,
            model_prefix_filter: "NRG".to_string(),
            require_model_prefix: false,
            raw_preview_length: 200,
            price_retail_column: Some(3),
            price_wholesale_column: Some(4),
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
