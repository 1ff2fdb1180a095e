//! arXiv metadata records before and after cleaning

use crate::{Error, Result};
use arxprep_formats::Record;
use chrono::NaiveDate;
use serde_json::Value;

/// Top-level fields the pipeline reads from each input line.
pub const SOURCE_FIELDS: [&str; 5] = ["id", "title", "abstract", "categories", "update_date"];

/// One source metadata entry. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRecord {
    pub id: Option<String>,
    pub title: Option<String>,
    pub abstract_text: Option<String>,
    pub categories: Option<String>,
    pub update_date: Option<String>,
    /// Line in the input file, for error messages
    pub source_line: usize,
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn string_field(record: &Record, field: &'static str) -> Result<Option<String>> {
    match record.field(field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(Error::InvalidField {
            line: record.source_line,
            field,
            expected: "a string",
            found: type_name(other).to_string(),
        }),
    }
}

impl SourceRecord {
    /// Extract the known fields from a parsed JSON line.
    ///
    /// `id` may also be numeric, since older dumps store ids like `704.0001`.
    pub fn from_record(record: &Record) -> Result<Self> {
        let id = match record.field("id") {
            None => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(other) => {
                return Err(Error::InvalidField {
                    line: record.source_line,
                    field: "id",
                    expected: "a string or number",
                    found: type_name(other).to_string(),
                })
            }
        };

        Ok(Self {
            id,
            title: string_field(record, "title")?,
            abstract_text: string_field(record, "abstract")?,
            categories: string_field(record, "categories")?,
            update_date: string_field(record, "update_date")?,
            source_line: record.source_line,
        })
    }
}

/// A record after cleaning, ready to be written as one CSV row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedRecord {
    pub id: Option<String>,
    pub text: String,
    pub categories: String,
    pub update_date: Option<NaiveDate>,
}

impl CleanedRecord {
    /// Column names, with `id` in front when ids are kept.
    pub fn header(include_id: bool) -> Vec<&'static str> {
        let mut header = Vec::with_capacity(4);
        if include_id {
            header.push("id");
        }
        header.extend(["text", "categories", "update_date"]);
        header
    }

    /// Field values in [`CleanedRecord::header`] order.
    pub fn to_row(&self, include_id: bool) -> Vec<String> {
        let mut row = Vec::with_capacity(4);
        if include_id {
            row.push(self.id.clone().unwrap_or_default());
        }
        row.push(self.text.clone());
        row.push(self.categories.clone());
        row.push(
            self.update_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        );
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_record_full() {
        let record = Record::new(
            json!({
                "id": "0704.0001",
                "title": "Calculation of prompt diphoton production",
                "abstract": "A fully differential calculation",
                "categories": "hep-ph",
                "update_date": "2008-11-13",
                "authors": "C. Balazs"
            }),
            7,
        );

        let source = SourceRecord::from_record(&record).unwrap();
        assert_eq!(source.id.as_deref(), Some("0704.0001"));
        assert_eq!(source.title.as_deref(), Some("Calculation of prompt diphoton production"));
        assert_eq!(source.abstract_text.as_deref(), Some("A fully differential calculation"));
        assert_eq!(source.categories.as_deref(), Some("hep-ph"));
        assert_eq!(source.update_date.as_deref(), Some("2008-11-13"));
        assert_eq!(source.source_line, 7);
    }

    #[test]
    fn test_missing_and_null_fields() {
        let record = Record::new(json!({"title": null, "abstract": "text"}), 1);
        let source = SourceRecord::from_record(&record).unwrap();

        assert!(source.id.is_none());
        assert!(source.title.is_none());
        assert_eq!(source.abstract_text.as_deref(), Some("text"));
        assert!(source.update_date.is_none());
    }

    #[test]
    fn test_numeric_id() {
        let record = Record::new(json!({"id": 704.0001}), 1);
        let source = SourceRecord::from_record(&record).unwrap();
        assert_eq!(source.id.as_deref(), Some("704.0001"));
    }

    #[test]
    fn test_wrong_field_type() {
        let record = Record::new(json!({"title": 42}), 9);
        match SourceRecord::from_record(&record) {
            Err(Error::InvalidField { line, field, found, .. }) => {
                assert_eq!(line, 9);
                assert_eq!(field, "title");
                assert_eq!(found, "a number");
            }
            other => panic!("expected InvalidField, got {:?}", other),
        }
    }

    #[test]
    fn test_header_and_row() {
        let cleaned = CleanedRecord {
            id: Some("0704.0001".to_string()),
            text: "diphoton production".to_string(),
            categories: "hep-ph".to_string(),
            update_date: NaiveDate::from_ymd_opt(2008, 11, 13),
        };

        assert_eq!(CleanedRecord::header(false), vec!["text", "categories", "update_date"]);
        assert_eq!(cleaned.to_row(false), vec!["diphoton production", "hep-ph", "2008-11-13"]);

        assert_eq!(CleanedRecord::header(true)[0], "id");
        assert_eq!(cleaned.to_row(true)[0], "0704.0001");
    }

    #[test]
    fn test_row_missing_date() {
        let cleaned = CleanedRecord {
            id: None,
            text: "galaxy".to_string(),
            categories: String::new(),
            update_date: None,
        };
        assert_eq!(cleaned.to_row(true), vec!["", "galaxy", "", ""]);
    }
}
