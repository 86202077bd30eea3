//! Row → record assembly

use crate::config::ExtractorConfig;
use crate::fields::FieldExtractor;
use crate::locator::ImageLocator;
use specsheet_domain::record::truncate_preview;
use specsheet_domain::{CatalogRecord, ExtractedFields, RawRow, RowContent};
use std::fmt;

/// Why a row produced no record
///
/// Skipping is a filtering decision, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The identifier column is absent or blank
    MissingIdentifier,

    /// The identifier does not carry the brand token
    PrefixMismatch,

    /// A text line contains no model token
    NoModelToken,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingIdentifier => f.write_str("missing identifier"),
            SkipReason::PrefixMismatch => f.write_str("identifier lacks brand prefix"),
            SkipReason::NoModelToken => f.write_str("no model token in line"),
        }
    }
}

/// Outcome of assembling one row
#[derive(Debug, Clone, PartialEq)]
pub enum Assembly {
    /// The row became a record
    Record(CatalogRecord),

    /// The row was filtered out
    Skipped(SkipReason),
}

/// Combines identifier, extracted fields, and located image into a record
pub struct RecordAssembler {
    extractor: FieldExtractor,
    config: ExtractorConfig,
}

impl RecordAssembler {
    /// Create an assembler for the given layout
    pub fn new(extractor: FieldExtractor, config: ExtractorConfig) -> Self {
        Self { extractor, config }
    }

    /// The field extractor in use
    pub fn extractor(&self) -> &FieldExtractor {
        &self.extractor
    }

    /// Assemble zero or one record from `row`
    pub fn assemble(&self, row: &RawRow, locator: &ImageLocator<'_>) -> Assembly {
        self.build(row, locator, None)
    }

    /// Assemble a record, using `model` when the row itself yields no identifier
    ///
    /// Used by single-item lookup, where the requested model may have been
    /// found in a cell other than the identifier column.
    pub fn assemble_as(&self, row: &RawRow, locator: &ImageLocator<'_>, model: &str) -> CatalogRecord {
        match self.build(row, locator, Some(model)) {
            Assembly::Record(record) => record,
            // build only skips when no fallback is given
            Assembly::Skipped(_) => CatalogRecord::new(model, ExtractedFields::default(), ""),
        }
    }

    fn build(&self, row: &RawRow, locator: &ImageLocator<'_>, fallback: Option<&str>) -> Assembly {
        let (model, fields, blob) = match &row.content {
            RowContent::Cells(_) => {
                let model = match (self.identifier(row), fallback) {
                    (Ok(model), _) => model.to_string(),
                    (Err(_), Some(fallback)) => fallback.trim().to_string(),
                    (Err(reason), None) => return Assembly::Skipped(reason),
                };
                let blob = self.spec_blob(row);
                let fields = self.extractor.extract(&blob).with_model(model.as_str());
                (model, fields, blob)
            }
            RowContent::Line(line) => {
                let fields = self.extractor.extract(line);
                let model = match (fields.model.clone(), fallback) {
                    (Some(model), _) => model,
                    (None, Some(fallback)) => fallback.trim().to_string(),
                    (None, None) => return Assembly::Skipped(SkipReason::NoModelToken),
                };
                let fields = fields.with_model(model.as_str());
                (model, fields, line.clone())
            }
        };

        if model.is_empty() {
            return Assembly::Skipped(SkipReason::MissingIdentifier);
        }

        let name = self
            .config
            .name_column
            .and_then(|column| row.cell(column))
            .map(str::to_string)
            .unwrap_or_else(|| model.clone());

        Assembly::Record(CatalogRecord {
            name,
            fields,
            image: locator.locate(row.index).map(|anchor| anchor.data.clone()),
            raw: truncate_preview(blob.trim(), self.config.raw_preview_length),
            price_retail: self.price(row, self.config.price_retail_column),
            price_wholesale: self.price(row, self.config.price_wholesale_column),
            model,
        })
    }

    fn identifier<'r>(&self, row: &'r RawRow) -> Result<&'r str, SkipReason> {
        let model = row
            .cell(self.config.model_column)
            .ok_or(SkipReason::MissingIdentifier)?;
        if self.config.require_model_prefix && !self.extractor.has_prefix(model) {
            return Err(SkipReason::PrefixMismatch);
        }
        Ok(model)
    }

    fn spec_blob(&self, row: &RawRow) -> String {
        self.config
            .spec_columns
            .iter()
            .filter_map(|&column| row.cell(column))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn price(&self, row: &RawRow, column: Option<usize>) -> Option<f64> {
        column.and_then(|c| row.cell(c)).and_then(parse_price)
    }
}

/// Parse a price cell such as `12 500,00` or `1500.5`
fn parse_price(cell: &str) -> Option<f64> {
    let normalized: String = cell
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    normalized.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use specsheet_domain::{Category, ImageAnchor};

    fn assembler(config: ExtractorConfig) -> RecordAssembler {
        let extractor = FieldExtractor::new(&config.model_prefix_filter).unwrap();
        RecordAssembler::new(extractor, config)
    }

    fn cells(index: usize, values: &[&str]) -> RawRow {
        RawRow::cells(
            index,
            values.iter().map(|v| Some(v.to_string())).collect(),
        )
    }

    fn expect_record(assembly: Assembly) -> CatalogRecord {
        match assembly {
            Assembly::Record(record) => record,
            Assembly::Skipped(reason) => panic!("Expected record, row skipped: {}", reason),
        }
    }

    #[test]
    fn test_tabular_row() {
        let a = assembler(ExtractorConfig::default());
        let row = cells(3, &["NRG-PRO-100", "industrial light", "100W 12000lm IP65"]);
        let record = expect_record(a.assemble(&row, &ImageLocator::empty(1)));

        assert_eq!(record.model, "NRG-PRO-100");
        assert_eq!(record.name, "NRG-PRO-100");
        assert_eq!(record.fields.model.as_deref(), Some("NRG-PRO-100"));
        assert_eq!(record.fields.power_w, Some(100));
        assert_eq!(record.fields.category, Some(Category::Industrial));
        assert_eq!(record.raw, "industrial light 100W 12000lm IP65");
        assert!(record.image.is_none());
    }

    #[test]
    fn test_blank_identifier_skipped() {
        let a = assembler(ExtractorConfig::default());
        let row = RawRow::cells(2, vec![Some("   ".to_string()), Some("100W".to_string())]);
        assert_eq!(
            a.assemble(&row, &ImageLocator::empty(1)),
            Assembly::Skipped(SkipReason::MissingIdentifier)
        );

        let narrow = RawRow::cells(2, vec![]);
        assert_eq!(
            a.assemble(&narrow, &ImageLocator::empty(1)),
            Assembly::Skipped(SkipReason::MissingIdentifier)
        );
    }

    #[test]
    fn test_prefix_filter() {
        let a = assembler(ExtractorConfig::default());
        let row = cells(2, &["Итого", "", "100W"]);
        assert_eq!(
            a.assemble(&row, &ImageLocator::empty(1)),
            Assembly::Skipped(SkipReason::PrefixMismatch)
        );

        let lenient = assembler(ExtractorConfig {
            require_model_prefix: false,
            ..Default::default()
        });
        let record = expect_record(lenient.assemble(&row, &ImageLocator::empty(1)));
        assert_eq!(record.model, "Итого");
    }

    #[test]
    fn test_image_attached_from_row_index() {
        let a = assembler(ExtractorConfig::default());
        let anchors = vec![
            ImageAnchor::new(7, 1, vec![9, 9]),
            ImageAnchor::new(8, 1, vec![1]),
        ];
        let locator = ImageLocator::new(&anchors, 1);
        let record = expect_record(a.assemble(&cells(7, &["NRG-7", "", "50W"]), &locator));
        assert_eq!(record.image, Some(vec![9, 9]));
    }

    #[test]
    fn test_name_and_prices() {
        let config = ExtractorConfig {
            name_column: Some(1),
            spec_columns: vec![2],
            price_retail_column: Some(3),
            price_wholesale_column: Some(4),
            ..Default::default()
        };
        let a = assembler(config);
        let row = cells(5, &["NRG-5", "Светильник офисный", "36Вт", "12 500,50", "н/д"]);
        let record = expect_record(a.assemble(&row, &ImageLocator::empty(1)));

        assert_eq!(record.name, "Светильник офисный");
        assert_eq!(record.raw, "36Вт");
        // category comes only from the spec columns
        assert_eq!(record.fields.category, None);
        assert_eq!(record.price_retail, Some(12500.5));
        assert_eq!(record.price_wholesale, None);
    }

    #[test]
    fn test_raw_preview_capped() {
        let a = assembler(ExtractorConfig {
            raw_preview_length: 10,
            ..Default::default()
        });
        let row = cells(1, &["NRG-1", "Прожектор светодиодный", "200Вт"]);
        let record = expect_record(a.assemble(&row, &ImageLocator::empty(1)));
        assert_eq!(record.raw, "Прожектор ");
        assert_eq!(record.fields.power_w, Some(200));
    }

    #[test]
    fn test_text_line_uses_model_token() {
        let a = assembler(ExtractorConfig::default());
        let row = RawRow::line(12, "  Уличный NRG-STREET-50 50Вт IP66  ");
        let record = expect_record(a.assemble(&row, &ImageLocator::empty(1)));
        assert_eq!(record.model, "NRG-STREET-50");
        assert_eq!(record.raw, "Уличный NRG-STREET-50 50Вт IP66");
        assert_eq!(record.fields.category, Some(Category::Street));

        let anonymous = RawRow::line(13, "Прожектор 100Вт");
        assert_eq!(
            a.assemble(&anonymous, &ImageLocator::empty(1)),
            Assembly::Skipped(SkipReason::NoModelToken)
        );
    }

    #[test]
    fn test_assemble_as_falls_back_to_requested_model() {
        let a = assembler(ExtractorConfig::default());
        let row = cells(9, &["", "", "NRG-TRADE-20-1000 20Вт"]);
        let record = a.assemble_as(&row, &ImageLocator::empty(1), "NRG-TRADE-20-1000");
        assert_eq!(record.model, "NRG-TRADE-20-1000");
        assert_eq!(record.fields.power_w, Some(20));
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("1500"), Some(1500.0));
        assert_eq!(parse_price("1\u{a0}500,25"), Some(1500.25));
        assert_eq!(parse_price("по запросу"), None);
    }
}
