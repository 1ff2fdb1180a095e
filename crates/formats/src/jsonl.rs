//! Streaming JSONL (JSON Lines) reader
//!
//! Reads newline-delimited JSON one line at a time, with transparent gzip
//! decompression. A line that is not valid JSON ends the stream with an
//! error carrying its line number.

use crate::{Error, Record, Result};
use flate2::read::GzDecoder;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Configuration for JSONL reader
#[derive(Debug, Clone)]
pub struct JsonlConfig {
    /// Fields to extract (None = all fields)
    pub fields: Option<Vec<String>>,
    /// Buffer size for BufReader
    pub buffer_size: usize,
}

impl Default for JsonlConfig {
    fn default() -> Self {
        Self {
            fields: None,
            buffer_size: 64 * 1024, // 64KB buffer
        }
    }
}

/// Open a file for reading, decompressing `.gz` transparently.
///
/// Returns the reader and the on-disk size for uncompressed files.
fn open_source(path: &Path) -> Result<(Box<dyn Read>, Option<u64>)> {
    let file = File::open(path)?;
    let total_bytes = file.metadata()?.len();

    match path.extension().and_then(|e| e.to_str()) {
        Some("gz") => {
            debug!("Opening gzip-compressed JSONL file: {:?}", path);
            Ok((Box::new(GzDecoder::new(file)), None))
        }
        _ => {
            debug!("Opening plain JSONL file: {:?}", path);
            Ok((Box::new(file), Some(total_bytes)))
        }
    }
}

/// Count the non-blank lines of a JSONL file without parsing them.
pub fn count_lines<P: AsRef<Path>>(path: P) -> Result<u64> {
    let (source, _) = open_source(path.as_ref())?;
    let mut reader = BufReader::with_capacity(JsonlConfig::default().buffer_size, source);
    let mut line = Vec::new();
    let mut count = 0;

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        if !line.iter().all(u8::is_ascii_whitespace) {
            count += 1;
        }
    }

    Ok(count)
}

/// Streaming JSONL reader that processes files line-by-line
pub struct JsonlReader<R: Read> {
    reader: BufReader<R>,
    config: JsonlConfig,
    line_number: usize,
    records_read: usize,
    bytes_read: u64,
    total_bytes: Option<u64>,
    failed: bool,
}

impl JsonlReader<Box<dyn Read>> {
    /// Open a JSONL file, auto-detecting gzip compression
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let (source, total_bytes) = open_source(path.as_ref())?;
        Ok(Self::new_with_config(source, JsonlConfig::default(), total_bytes))
    }
}

impl<R: Read> JsonlReader<R> {
    /// Create a new JSONL reader from any Read source
    pub fn new(reader: R) -> Self {
        Self::new_with_config(reader, JsonlConfig::default(), None)
    }

    /// Create a new JSONL reader with custom configuration
    pub fn new_with_config(reader: R, config: JsonlConfig, total_bytes: Option<u64>) -> Self {
        let buf_reader = BufReader::with_capacity(config.buffer_size, reader);
        Self {
            reader: buf_reader,
            config,
            line_number: 0,
            records_read: 0,
            bytes_read: 0,
            total_bytes,
            failed: false,
        }
    }

    /// Set specific fields to extract
    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.config.fields = Some(fields);
        self
    }

    /// Get the number of records yielded
    pub fn records_processed(&self) -> usize {
        self.records_read
    }

    /// Get the number of bytes read
    pub fn bytes_processed(&self) -> u64 {
        self.bytes_read
    }

    /// Get total file size if known
    pub fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }

    /// Extract only specified fields from a JSON value
    fn extract_fields(&self, value: Value) -> Value {
        match (&self.config.fields, value) {
            (Some(fields), Value::Object(map)) => {
                let filtered: serde_json::Map<String, Value> = map
                    .into_iter()
                    .filter(|(k, _)| fields.contains(k))
                    .collect();
                Value::Object(filtered)
            }
            (_, value) => value,
        }
    }
}

impl<R: Read> Iterator for JsonlReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let mut line = String::new();

        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None, // EOF
                Ok(n) => {
                    self.bytes_read += n as u64;
                    self.line_number += 1;

                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    return match serde_json::from_str::<Value>(trimmed) {
                        Ok(value) => {
                            self.records_read += 1;
                            let extracted = self.extract_fields(value);
                            Some(Ok(Record::new(extracted, self.line_number)))
                        }
                        Err(source) => {
                            self.failed = true;
                            Some(Err(Error::JsonParse {
                                line: self.line_number,
                                source,
                            }))
                        }
                    };
                }
                Err(e) => {
                    self.failed = true;
                    return Some(Err(Error::Io(e)));
                }
            }
        }
    }
}
