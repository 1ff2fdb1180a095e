//! Dataset reader abstraction
//!
//! Provides a common interface over the supported input encodings with
//! format detection based on file extensions.

use crate::{jsonl::JsonlReader, Error, Record, Result};
use std::path::Path;
use tracing::info;

/// Trait for dataset readers providing unified interface
pub trait DatasetReader: Iterator<Item = Result<Record>> {
    /// Get total file size in bytes if known
    fn total_bytes(&self) -> Option<u64>;

    /// Get number of bytes processed so far
    fn bytes_processed(&self) -> u64;

    /// Get the number of records processed
    fn records_processed(&self) -> usize;
}

/// JSONL dataset reader wrapper
pub struct JsonlDatasetReader {
    reader: JsonlReader<Box<dyn std::io::Read>>,
}

impl Iterator for JsonlDatasetReader {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.next()
    }
}

impl DatasetReader for JsonlDatasetReader {
    fn total_bytes(&self) -> Option<u64> {
        self.reader.total_bytes()
    }

    fn bytes_processed(&self) -> u64 {
        self.reader.bytes_processed()
    }

    fn records_processed(&self) -> usize {
        self.reader.records_processed()
    }
}

fn extension_of(path: &Path) -> Result<&str> {
    path.extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| Error::UnsupportedFormat("No file extension found".to_string()))
}

fn open_jsonl(path: &Path, extension: &str) -> Result<JsonlReader<Box<dyn std::io::Read>>> {
    match extension {
        // `.gz` is assumed to be gzipped JSONL
        "jsonl" | "json" | "ndjson" | "gz" => JsonlReader::open(path),
        _ => Err(Error::UnsupportedFormat(format!(
            "Unsupported file extension: {}",
            extension
        ))),
    }
}

/// Open a dataset with automatic format detection
///
/// Supported formats:
/// - `.jsonl`, `.json`, `.ndjson` - JSON Lines format
/// - `.gz` - Gzip-compressed JSON Lines
pub fn open_dataset<P: AsRef<Path>>(path: P) -> Result<Box<dyn DatasetReader>> {
    let path = path.as_ref();
    let extension = extension_of(path)?;

    info!("Opening dataset: {:?} (format: {})", path, extension);

    let reader = open_jsonl(path, extension)?;
    Ok(Box::new(JsonlDatasetReader { reader }))
}

/// Open a dataset keeping only the given top-level fields of each record
pub fn open_dataset_with_fields<P: AsRef<Path>>(
    path: P,
    fields: Vec<String>,
) -> Result<Box<dyn DatasetReader>> {
    let path = path.as_ref();
    let extension = extension_of(path)?;

    info!(
        "Opening dataset: {:?} (format: {}, fields: {:?})",
        path, extension, fields
    );

    let reader = open_jsonl(path, extension)?.with_fields(fields);
    Ok(Box::new(JsonlDatasetReader { reader }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_lines(path: &Path, lines: &[&str]) {
        let mut file = std::fs::File::create(path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
    }

    #[test]
    fn test_open_jsonl_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arxiv.json");
        write_lines(&path, &[r#"{"title": "hello"}"#, r#"{"title": "world"}"#]);

        let mut reader = open_dataset(&path).unwrap();
        let records: Vec<_> = reader.by_ref().collect::<Result<Vec<_>>>().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].data["title"], "hello");
    }

    #[test]
    fn test_open_dataset_unsupported_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arxiv.txt");
        write_lines(&path, &[r#"{"title": "hello"}"#]);

        let result = open_dataset(&path);
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_open_dataset_no_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arxiv");
        write_lines(&path, &[r#"{"title": "hello"}"#]);

        assert!(matches!(open_dataset(&path), Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_open_dataset_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.jsonl");

        assert!(matches!(open_dataset(&path), Err(Error::Io(_))));
    }

    #[test]
    fn test_dataset_reader_progress() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arxiv.jsonl");
        write_lines(&path, &[r#"{"title": "hello"}"#, r#"{"title": "world"}"#]);

        let mut reader = open_dataset(&path).unwrap();

        assert_eq!(reader.records_processed(), 0);
        assert!(reader.total_bytes().unwrap() > 0);

        let _ = reader.next();
        assert_eq!(reader.records_processed(), 1);
        assert!(reader.bytes_processed() > 0);
    }

    #[test]
    fn test_open_dataset_with_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arxiv.jsonl");
        write_lines(
            &path,
            &[
                r#"{"title": "hello", "id": 1, "authors": "extra"}"#,
                r#"{"title": "world", "id": 2, "authors": "data"}"#,
            ],
        );

        let reader = open_dataset_with_fields(&path, vec!["title".to_string()]).unwrap();
        let records: Vec<_> = reader.collect::<Result<Vec<_>>>().unwrap();

        assert_eq!(records.len(), 2);
        assert!(records[0].data.get("title").is_some());
        assert!(records[0].data.get("id").is_none());
        assert!(records[0].data.get("authors").is_none());
    }
}
