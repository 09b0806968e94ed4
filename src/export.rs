//! CSV export of selected cards.
//!
//! The exporter assembles bytes and a filename; persisting them is the
//! sink's business. Values are quoted only when they contain the delimiter,
//! a double quote, or a newline, with internal quotes doubled; the header
//! row gets the same treatment. A UTF-8 BOM is prepended so spreadsheet
//! consumers detect the encoding.

use crate::cards::Card;
use chrono::Local;
use color_eyre::Result;
use csv::{QuoteStyle, WriterBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CSV_CONTENT_TYPE: &str = "text/csv;charset=utf-8";

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Export preconditions and failures. The two precondition variants are
/// user-visible warnings, not errors: the operation is simply not performed.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no cards selected; select at least one card before exporting")]
    NoCardsSelected,
    #[error("no fields chosen; choose at least one field to export")]
    NoFieldsChosen,
    #[error("csv assembly failed: {0}")]
    Csv(#[from] csv::Error),
}

/// A finished export: bytes plus the metadata the sink needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    /// Dated for traceability: `cards_YYYY-MM-DD.csv`.
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Assemble a CSV from the resolved selection and the chosen field names.
///
/// Each row holds, per chosen name, the value of the card's first field with
/// that display name, or the empty string when the card lacks it. Both
/// inputs must be non-empty.
pub fn build_csv(cards: &[&Card], field_names: &[String]) -> Result<CsvExport, ExportError> {
    if cards.is_empty() {
        return Err(ExportError::NoCardsSelected);
    }
    if field_names.is_empty() {
        return Err(ExportError::NoFieldsChosen);
    }

    let mut bytes = Vec::from(UTF8_BOM);
    {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Necessary)
            .from_writer(&mut bytes);
        writer.write_record(field_names)?;
        for card in cards {
            let record: Vec<&str> = field_names
                .iter()
                .map(|name| card.field_value(name).unwrap_or(""))
                .collect();
            writer.write_record(&record)?;
        }
        writer.flush().map_err(csv::Error::from)?;
    }

    Ok(CsvExport {
        filename: format!("cards_{}.csv", Local::now().format("%Y-%m-%d")),
        content_type: CSV_CONTENT_TYPE,
        bytes,
    })
}

/// Opaque byte sink for finished exports. The exporter has no knowledge of
/// how bytes are persisted.
pub trait FileSink {
    /// Persist the export, returning where it landed.
    fn save(&mut self, export: &CsvExport) -> Result<PathBuf>;
}

/// Sink that writes exports into a target directory.
#[derive(Debug, Clone)]
pub struct DiskSink {
    dir: PathBuf,
}

impl DiskSink {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl FileSink for DiskSink {
    fn save(&mut self, export: &CsvExport) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&export.filename);
        fs::write(&path, &export.bytes)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{VizData, build_cards};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn two_cards() -> Vec<Card> {
        let viz: VizData = serde_json::from_value(json!({
            "datasets": [
                { "img": "https://a.com/0.png", "n": "alpha", "v": 1 },
                { "img": "https://a.com/1.png", "n": "beta",  "v": 2 }
            ],
            "fieldMap": { "img": {}, "n": { "alias": "Name" }, "v": { "alias": "Value" } },
            "locationMap": { "dimensions": ["img", "n"], "measures": ["v"] }
        }))
        .unwrap();
        build_cards(&viz)
    }

    fn body(export: &CsvExport) -> &str {
        let text = std::str::from_utf8(&export.bytes).unwrap();
        text.strip_prefix('\u{feff}').unwrap()
    }

    #[test]
    fn test_two_cards_two_fields_three_lines() {
        let cards = two_cards();
        let refs: Vec<&Card> = cards.iter().collect();
        let names = vec!["Name".to_string(), "Value".to_string()];
        let export = build_csv(&refs, &names).unwrap();

        assert_eq!(export.content_type, "text/csv;charset=utf-8");
        let lines: Vec<&str> = body(&export).lines().collect();
        assert_eq!(lines, vec!["Name,Value", "alpha,1", "beta,2"]);
        for line in lines {
            assert_eq!(line.matches(',').count(), 1);
        }
    }

    #[test]
    fn test_bom_is_prepended() {
        let cards = two_cards();
        let refs: Vec<&Card> = cards.iter().collect();
        let export = build_csv(&refs, &["Name".to_string()]).unwrap();
        assert_eq!(&export.bytes[..3], &[0xEF, 0xBB, 0xBF]);
    }

    #[test]
    fn test_values_are_escaped() {
        let viz: VizData = serde_json::from_value(json!({
            "datasets": [
                { "img": "https://a.com/0.png", "q": "He said, \"hi\"" }
            ],
            "fieldMap": { "img": {}, "q": { "alias": "Quote" } },
            "locationMap": { "dimensions": ["img", "q"] }
        }))
        .unwrap();
        let cards = build_cards(&viz);
        let refs: Vec<&Card> = cards.iter().collect();
        let export = build_csv(&refs, &["Quote".to_string()]).unwrap();

        let lines: Vec<&str> = body(&export).lines().collect();
        assert_eq!(lines[1], "\"He said, \"\"hi\"\"\"");
    }

    #[test]
    fn test_missing_field_exports_empty() {
        let cards = two_cards();
        let refs: Vec<&Card> = cards.iter().collect();
        let names = vec!["Name".to_string(), "Nonexistent".to_string()];
        let export = build_csv(&refs, &names).unwrap();
        let lines: Vec<&str> = body(&export).lines().collect();
        assert_eq!(lines[1], "alpha,");
    }

    #[test]
    fn test_filename_embeds_date() {
        let cards = two_cards();
        let refs: Vec<&Card> = cards.iter().collect();
        let export = build_csv(&refs, &["Name".to_string()]).unwrap();
        let expected = format!("cards_{}.csv", Local::now().format("%Y-%m-%d"));
        assert_eq!(export.filename, expected);
    }

    #[test]
    fn test_preconditions() {
        let cards = two_cards();
        let refs: Vec<&Card> = cards.iter().collect();
        assert!(matches!(
            build_csv(&[], &["Name".to_string()]),
            Err(ExportError::NoCardsSelected)
        ));
        assert!(matches!(
            build_csv(&refs, &[]),
            Err(ExportError::NoFieldsChosen)
        ));
    }

    #[test]
    fn test_disk_sink_writes_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let cards = two_cards();
        let refs: Vec<&Card> = cards.iter().collect();
        let export = build_csv(&refs, &["Name".to_string()]).unwrap();

        let mut sink = DiskSink::new(dir.path());
        let path = sink.save(&export).unwrap();
        assert_eq!(fs::read(path).unwrap(), export.bytes);
    }
}
