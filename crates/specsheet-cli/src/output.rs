//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use specsheet_domain::record::truncate_preview;
use specsheet_domain::CatalogRecord;
use specsheet_extractor::{ExtractionOutcome, RunStats};
use specsheet_sink::CatalogEntry;
use std::path::Path;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const CELL_PREVIEW: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the result of a catalog run.
    pub fn format_run(&self, outcome: &ExtractionOutcome, output: &Path) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let summary = serde_json::json!({
                    "output": output.display().to_string(),
                    "records": outcome.records.len(),
                    "stats": outcome.stats,
                });
                Ok(serde_json::to_string_pretty(&summary)?)
            }
            OutputFormat::Table => Ok(format!(
                "{}\n{}",
                self.format_records_table(&outcome.records),
                self.run_summary(&outcome.stats, outcome.records.len(), output)
            )),
            OutputFormat::Quiet => Ok(models(&outcome.records)),
        }
    }

    /// Format a single looked-up record and the row it came from.
    pub fn format_lookup(
        &self,
        entry: &CatalogEntry,
        row_index: usize,
        cells: &[Option<String>],
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "row": row_index,
                    "cells": cells,
                    "record": entry,
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => Ok(self.format_lookup_table(entry, row_index, cells)),
            OutputFormat::Quiet => Ok(entry.model.clone()),
        }
    }

    /// Format records as a table.
    fn format_records_table(&self, records: &[CatalogRecord]) -> String {
        if records.is_empty() {
            return self.colorize("No records found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Model", "Power, W", "Lumens", "IP", "Category", "Dimensions, mm", "Image"]);

        for record in records {
            let fields = &record.fields;
            builder.push_record([
                record.model.clone(),
                optional(fields.power_w),
                optional(fields.lumens),
                fields.ip_rating.clone().unwrap_or_else(|| "-".to_string()),
                fields
                    .category
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                fields
                    .dimensions_mm
                    .map(|d| format!("{}×{}×{}", d.length_mm, d.width_mm, d.height_mm))
                    .unwrap_or_else(|| "-".to_string()),
                if record.image.is_some() { "yes" } else { "-" }.to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format one entry as a field/value table followed by its source row.
    fn format_lookup_table(&self, entry: &CatalogEntry, row_index: usize, cells: &[Option<String>]) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);

        let dimensions = entry
            .dimensions_mm
            .map(|d| format!("{}×{}×{}", d.length_mm, d.width_mm, d.height_mm));
        let rows: Vec<(&str, Option<String>)> = vec![
            ("model", Some(entry.model.clone())),
            ("name", Some(entry.name.clone())),
            ("power_w", entry.power_w.map(|v| v.to_string())),
            ("lumens", entry.lumens.map(|v| v.to_string())),
            ("ip_rating", entry.ip_rating.clone()),
            ("category", entry.category.clone()),
            ("dimensions_mm", dimensions),
            ("weight_kg", entry.weight_kg.map(|v| v.to_string())),
            ("warranty_years", entry.warranty_years.map(|v| v.to_string())),
            ("price_retail", entry.price_retail.map(|v| v.to_string())),
            ("price_wholesale", entry.price_wholesale.map(|v| v.to_string())),
            ("image", entry.image.as_deref().map(|v| truncate_preview(v, CELL_PREVIEW))),
            ("raw", Some(entry.raw.clone())),
        ];
        for (field, value) in rows {
            builder.push_record([field.to_string(), value.unwrap_or_else(|| "-".to_string())]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let row: Vec<String> = cells
            .iter()
            .map(|c| truncate_preview(c.as_deref().unwrap_or(""), CELL_PREVIEW))
            .collect();

        format!(
            "{}\n{}",
            table,
            self.info(&format!("Row {}: {}", row_index, row.join(" | ")))
        )
    }

    /// One-line run summary.
    pub fn run_summary(&self, stats: &RunStats, records: usize, output: &Path) -> String {
        self.success(&format!(
            "Wrote {} records to {} ({} rows read, {} skipped, {} duplicates merged, {} images, {} ms)",
            records,
            output.display(),
            stats.rows_read,
            stats.rows_skipped,
            stats.duplicates_merged,
            stats.images_located,
            stats.processing_time_ms
        ))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn optional(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn models(records: &[CatalogRecord]) -> String {
    records
        .iter()
        .map(|r| r.model.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use specsheet_domain::{Category, ExtractedFields};

    fn create_test_record() -> CatalogRecord {
        let fields = ExtractedFields {
            power_w: Some(100),
            ip_rating: Some("IP65".to_string()),
            category: Some(Category::Industrial),
            ..Default::default()
        };
        CatalogRecord::new("NRG-PRO-100", fields.with_model("NRG-PRO-100"), "100W IP65")
    }

    fn outcome() -> ExtractionOutcome {
        ExtractionOutcome {
            records: vec![create_test_record()],
            stats: RunStats {
                rows_read: 3,
                rows_skipped: 2,
                records_assembled: 1,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_run(&outcome(), Path::new("catalog.json")).unwrap();
        assert!(output.contains("Model"));
        assert!(output.contains("NRG-PRO-100"));
        assert!(output.contains("industrial"));
        assert!(output.contains("✓ Wrote 1 records to catalog.json (3 rows read, 2 skipped"));
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_run(&outcome(), Path::new("catalog.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["records"], 1);
        assert_eq!(value["stats"]["rows_skipped"], 2);
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_run(&outcome(), Path::new("catalog.json")).unwrap();
        assert_eq!(output, "NRG-PRO-100");
    }

    #[test]
    fn test_empty_records() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let empty = ExtractionOutcome {
            records: Vec::new(),
            stats: RunStats::default(),
        };
        let output = formatter.format_run(&empty, Path::new("catalog.json")).unwrap();
        assert!(output.contains("No records found"));
    }

    #[test]
    fn test_lookup_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let entry = CatalogEntry::new(&create_test_record(), None);
        let cells = vec![Some("NRG-PRO-100".to_string()), None, Some("100W IP65".to_string())];
        let output = formatter.format_lookup(&entry, 7, &cells).unwrap();
        assert!(output.contains("power_w"));
        assert!(output.contains("IP65"));
        assert!(output.contains("ℹ Row 7: NRG-PRO-100 |  | 100W IP65"));
    }

    #[test]
    fn test_lookup_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let entry = CatalogEntry::new(&create_test_record(), None);
        let output = formatter.format_lookup(&entry, 7, &[None]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["row"], 7);
        assert_eq!(value["record"]["power_w"], 100);
        assert!(value["cells"][0].is_null());
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.error("bad"), "✗ bad");
        assert_eq!(formatter.warning("hm"), "⚠ hm");
    }
}
