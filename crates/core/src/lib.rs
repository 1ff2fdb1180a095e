//! Core normalization logic for arXiv metadata
//!
//! This crate turns line-delimited arXiv metadata into a cleaned CSV table:
//! records are read in bounded chunks, deduplicated within each chunk,
//! text-normalized, and appended to the output one chunk at a time.

pub mod concat;
pub mod date;
pub mod dedup;
pub mod error;
pub mod pipeline;
pub mod record;

pub use concat::concatenate_columns;
pub use dedup::{ChunkDeduplicator, DedupKeep, DedupStats};
pub use error::{Error, Result};
pub use pipeline::{
    NoProgress, Pipeline, PipelineBuilder, PipelineConfig, PipelineStats, ProgressObserver,
    DEFAULT_CHUNK_SIZE,
};
pub use record::{CleanedRecord, SourceRecord};
