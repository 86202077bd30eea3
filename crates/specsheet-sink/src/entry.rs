//! Serialized catalog layout

use crate::error::SinkError;
use crate::render::{ImageRenderer, StagedImages};
use serde::{Deserialize, Serialize};
use specsheet_domain::{CatalogRecord, Dimensions};

/// Dimensions as written to the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionsEntry {
    /// Length in millimetres
    pub length_mm: u32,
    /// Width in millimetres
    pub width_mm: u32,
    /// Height in millimetres
    pub height_mm: u32,
}

impl From<Dimensions> for DimensionsEntry {
    fn from(d: Dimensions) -> Self {
        Self {
            length_mm: d.length_mm,
            width_mm: d.width_mm,
            height_mm: d.height_mm,
        }
    }
}

/// One record as it appears in the catalog file
///
/// Field order here is the field order in the output. Absent values are
/// written as `null`, except prices, which are left out entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Unique model identifier
    pub model: String,
    /// Display name
    pub name: String,
    /// Power in watts
    pub power_w: Option<u32>,
    /// Luminous flux in lumens
    pub lumens: Option<u32>,
    /// Ingress protection code, `IPnn`
    pub ip_rating: Option<String>,
    /// Canonical category name
    pub category: Option<String>,
    /// Overall dimensions
    pub dimensions_mm: Option<DimensionsEntry>,
    /// Weight in kilograms
    pub weight_kg: Option<f64>,
    /// Warranty in years
    pub warranty_years: Option<u32>,
    /// Rendered image reference (path, data URI, or URL)
    pub image: Option<String>,
    /// Preview of the source text
    pub raw: String,
    /// Retail price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_retail: Option<f64>,
    /// Wholesale price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_wholesale: Option<f64>,
}

impl CatalogEntry {
    /// Build the entry for `record` with an already rendered image value
    pub fn new(record: &CatalogRecord, image: Option<String>) -> Self {
        let fields = &record.fields;
        Self {
            model: record.model.clone(),
            name: record.name.clone(),
            power_w: fields.power_w,
            lumens: fields.lumens,
            ip_rating: fields.ip_rating.clone(),
            category: fields.category.map(|c| c.as_str().to_string()),
            dimensions_mm: fields.dimensions_mm.map(DimensionsEntry::from),
            weight_kg: fields.weight_kg,
            warranty_years: fields.warranty_years,
            image,
            raw: record.raw.clone(),
            price_retail: record.price_retail,
            price_wholesale: record.price_wholesale,
        }
    }
}

/// Render every record's image and build the catalog entries in order
///
/// Image files for `file` mode are collected in `staged`; nothing touches
/// the filesystem here.
pub fn build_entries(
    records: &[CatalogRecord],
    renderer: &ImageRenderer,
    staged: &mut StagedImages,
) -> Vec<CatalogEntry> {
    records
        .iter()
        .map(|record| CatalogEntry::new(record, renderer.render(record, staged)))
        .collect()
}

/// Serialize entries as a pretty-printed JSON array
pub fn render_json(entries: &[CatalogEntry]) -> Result<String, SinkError> {
    Ok(serde_json::to_string_pretty(entries)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use specsheet_domain::{Category, ExtractedFields};

    fn json(records: &[CatalogRecord]) -> String {
        let entries = build_entries(records, &ImageRenderer::disabled(), &mut StagedImages::new());
        render_json(&entries).unwrap()
    }

    fn sample() -> CatalogRecord {
        let fields = ExtractedFields {
            power_w: Some(100),
            lumens: Some(12000),
            ip_rating: Some("IP65".to_string()),
            category: Some(Category::Industrial),
            ..Default::default()
        };
        CatalogRecord::new(
            "NRG-PRO-100",
            fields.with_model("NRG-PRO-100"),
            "industrial light 100W 12000lm IP65",
        )
    }

    #[test]
    fn test_field_order_and_nulls() {
        let json = json(&[sample()]);
        let keys: Vec<&str> = [
            "\"model\"",
            "\"name\"",
            "\"power_w\"",
            "\"lumens\"",
            "\"ip_rating\"",
            "\"category\"",
            "\"dimensions_mm\"",
            "\"weight_kg\"",
            "\"warranty_years\"",
            "\"image\"",
            "\"raw\"",
        ]
        .to_vec();
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        assert!(json.contains("\"dimensions_mm\": null"));
        assert!(json.contains("\"category\": \"industrial\""));
        assert!(!json.contains("price_retail"));
        assert!(json.starts_with("[\n  {"));
    }

    #[test]
    fn test_prices_present_when_set() {
        let mut record = sample();
        record.price_retail = Some(1500.0);
        let entry = CatalogEntry::new(&record, None);
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["price_retail"], 1500.0);
        assert!(value.get("price_wholesale").is_none());
    }

    #[test]
    fn test_cyrillic_is_not_escaped() {
        let mut record = sample();
        record.raw = "Прожектор 100Вт".to_string();
        let json = json(&[record]);
        assert!(json.contains("Прожектор 100Вт"));
    }

    #[test]
    fn test_dimensions_entry() {
        let mut record = sample();
        record.fields.dimensions_mm = Some(Dimensions::new(600, 200, 100));
        let value = serde_json::to_value(CatalogEntry::new(&record, None)).unwrap();
        assert_eq!(value["dimensions_mm"]["length_mm"], 600);
        assert_eq!(value["dimensions_mm"]["height_mm"], 100);
    }
}
