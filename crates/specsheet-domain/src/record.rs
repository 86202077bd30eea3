//! Record module - extracted fields and canonical catalog records

use crate::Category;

/// Overall dimensions in millimetres
///
/// All three axes are present together or the whole value is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    /// Length in millimetres
    pub length_mm: u32,

    /// Width in millimetres
    pub width_mm: u32,

    /// Height in millimetres
    pub height_mm: u32,
}

impl Dimensions {
    /// Create dimensions from the three axes
    pub fn new(length_mm: u32, width_mm: u32, height_mm: u32) -> Self {
        Self {
            length_mm,
            width_mm,
            height_mm,
        }
    }
}

/// Attributes parsed from a free-text spec blob
///
/// Every field is independently nullable: `None` means the pattern did not
/// match, never zero. Values are immutable once produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedFields {
    /// Electrical power in watts
    pub power_w: Option<u32>,

    /// Luminous flux in lumens
    pub lumens: Option<u32>,

    /// Ingress protection rating, normalized as `IPnn`
    pub ip_rating: Option<String>,

    /// Product category from the vocabulary
    pub category: Option<Category>,

    /// Overall dimensions
    pub dimensions_mm: Option<Dimensions>,

    /// Mass in kilograms
    pub weight_kg: Option<f64>,

    /// Warranty period in years
    pub warranty_years: Option<u32>,

    /// Model identifier
    pub model: Option<String>,
}

impl ExtractedFields {
    /// Supply the model out-of-band (e.g. from a dedicated identifier column)
    ///
    /// # Examples
    ///
    /// ```
    /// use specsheet_domain::ExtractedFields;
    ///
    /// let fields = ExtractedFields::default().with_model("NRG-PRO-100");
    /// assert_eq!(fields.model.as_deref(), Some("NRG-PRO-100"));
    /// assert!(fields.power_w.is_none());
    /// ```
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Whether no pattern matched at all (ignoring the model)
    pub fn is_empty(&self) -> bool {
        self.power_w.is_none()
            && self.lumens.is_none()
            && self.ip_rating.is_none()
            && self.category.is_none()
            && self.dimensions_mm.is_none()
            && self.weight_kg.is_none()
            && self.warranty_years.is_none()
    }
}

/// One canonical product entry
///
/// Created once per row by the assembler; the deduplicator may overwrite it
/// in place when a later row shares its `model`. Downstream of
/// deduplication it is read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRecord {
    /// Unique key: non-empty, trimmed model identifier
    pub model: String,

    /// Display name; mirrors `model` when no distinct name exists
    pub name: String,

    /// Parsed attributes
    pub fields: ExtractedFields,

    /// Payload of the image anchored to the record's row, if any
    pub image: Option<Vec<u8>>,

    /// Bounded preview of the spec blob the fields were parsed from
    pub raw: String,

    /// Retail price, when a price column is configured and parses
    pub price_retail: Option<f64>,

    /// Wholesale price, when a price column is configured and parses
    pub price_wholesale: Option<f64>,
}

impl CatalogRecord {
    /// Create a record with no image and no prices
    pub fn new(model: impl Into<String>, fields: ExtractedFields, raw: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            name: model.clone(),
            model,
            fields,
            image: None,
            raw: raw.into(),
            price_retail: None,
            price_wholesale: None,
        }
    }
}

/// Cut `text` down to at most `limit` characters
///
/// Counts characters rather than bytes so multi-byte text (Cyrillic unit
/// tokens, `×`) is never split mid-codepoint.
///
/// # Examples
///
/// ```
/// use specsheet_domain::record::truncate_preview;
///
/// assert_eq!(truncate_preview("Прожектор 100Вт", 9), "Прожектор");
/// assert_eq!(truncate_preview("short", 200), "short");
/// ```
pub fn truncate_preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the preview never exceeds the limit and is always a prefix
        #[test]
        fn test_truncate_preview_is_bounded_prefix(text in "\\PC{0,300}", limit in 0usize..250) {
            let preview = truncate_preview(&text, limit);
            prop_assert!(preview.chars().count() <= limit);
            prop_assert!(text.starts_with(&preview));
            if text.chars().count() <= limit {
                prop_assert_eq!(preview, text);
            }
        }
    }
}
