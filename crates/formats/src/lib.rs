//! File formats for dataset processing
//!
//! This crate provides a streaming reader for line-delimited JSON input
//! and the chunked CSV writer and sampler used for tabular output.

pub mod csv_writer;
pub mod error;
pub mod jsonl;
pub mod reader;
pub mod record;
pub mod sample;

pub use csv_writer::{CsvChunkWriter, WriteMode, WriterStats};
pub use error::{Error, Result};
pub use jsonl::count_lines;
pub use reader::{open_dataset, open_dataset_with_fields, DatasetReader};
pub use record::Record;
pub use sample::{sample_csv, DEFAULT_SAMPLE_ROWS};
