//! Chunked normalization pipeline
//!
//! Streams line-delimited JSON records in bounded chunks, deduplicates each
//! chunk on `(title, abstract)`, cleans both text fields, and appends the
//! resulting rows to a CSV file one chunk at a time.

use crate::date::parse_update_date;
use crate::dedup::{ChunkDeduplicator, DedupKeep};
use crate::record::{CleanedRecord, SourceRecord, SOURCE_FIELDS};
use crate::{Error, Result};
use arxprep_filters::{CleaningRules, TextCleaner};
use arxprep_formats::{open_dataset_with_fields, CsvChunkWriter, Record, WriteMode};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Records per chunk unless configured otherwise
pub const DEFAULT_CHUNK_SIZE: usize = 20_000;

/// Pipeline statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub records_read: usize,
    pub chunks_processed: usize,
    pub duplicates_dropped: usize,
    pub empty_dropped: usize,
    pub rows_written: usize,
}

impl PipelineStats {
    pub fn deduplication_rate(&self) -> f64 {
        if self.records_read > 0 {
            (self.duplicates_dropped as f64 / self.records_read as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn retention_rate(&self) -> f64 {
        if self.records_read > 0 {
            (self.rows_written as f64 / self.records_read as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Records held in memory at once
    pub chunk_size: usize,
    /// Which duplicate survives within a chunk
    pub dedup_keep: DedupKeep,
    /// Drop records whose cleaned text is empty
    pub drop_empty: bool,
    /// Carry the source `id` as the first output column
    pub include_id: bool,
    /// Truncate or append to an existing output file
    pub write_mode: WriteMode,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            dedup_keep: DedupKeep::First,
            drop_empty: true,
            include_id: false,
            write_mode: WriteMode::Truncate,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::InvalidConfig(
                "chunk_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Receives a callback after every chunk has been appended.
pub trait ProgressObserver {
    /// `records` is the number of input records in the chunk, kept or not.
    fn chunk_processed(&self, records: usize, stats: &PipelineStats);
}

/// Observer that ignores progress
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn chunk_processed(&self, _records: usize, _stats: &PipelineStats) {}
}

/// Normalization pipeline over arXiv metadata
#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
    cleaner: TextCleaner,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration and rule set
    pub fn new(config: PipelineConfig, rules: CleaningRules) -> Result<Self> {
        config.validate()?;

        // The rule set is compiled in; there is nothing to fetch.
        info!(
            "Cleaning rules ready: {} stop-words, minimum token length {}",
            rules.stopwords().len(),
            rules.min_token_len()
        );

        Ok(Self {
            config,
            cleaner: TextCleaner::new(rules),
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn cleaner(&self) -> &TextCleaner {
        &self.cleaner
    }

    /// Clean title and abstract and join them with a single space.
    ///
    /// An empty side contributes nothing, so the result never starts or
    /// ends with a space.
    pub fn clean_text(&self, title: Option<&str>, abstract_text: Option<&str>) -> String {
        let title = self.cleaner.clean_field(title);
        let abstract_text = self.cleaner.clean_field(abstract_text);

        match (title.is_empty(), abstract_text.is_empty()) {
            (_, true) => title,
            (true, false) => abstract_text,
            (false, false) => format!("{title} {abstract_text}"),
        }
    }

    /// Deduplicate, clean, filter and date-parse one chunk.
    ///
    /// A malformed date fails the whole chunk before anything is written.
    pub fn process_chunk(
        &self,
        chunk: Vec<SourceRecord>,
        stats: &mut PipelineStats,
    ) -> Result<Vec<CleanedRecord>> {
        let mut dedup = ChunkDeduplicator::new(self.config.dedup_keep);
        let unique = dedup.dedup(chunk);
        stats.duplicates_dropped += dedup.stats().duplicates_found;

        let mut cleaned = Vec::with_capacity(unique.len());
        for record in unique {
            let text = self.clean_text(record.title.as_deref(), record.abstract_text.as_deref());
            if self.config.drop_empty && text.is_empty() {
                stats.empty_dropped += 1;
                continue;
            }

            let update_date = match record.update_date {
                None => None,
                Some(raw) => Some(parse_update_date(&raw).ok_or_else(|| Error::InvalidDate {
                    line: record.source_line,
                    value: raw.clone(),
                })?),
            };

            cleaned.push(CleanedRecord {
                id: record.id,
                text,
                categories: record.categories.unwrap_or_default(),
                update_date,
            });
        }

        Ok(cleaned)
    }

    /// Run the pipeline from an input file to an output CSV file
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
        progress: &dyn ProgressObserver,
    ) -> Result<PipelineStats> {
        let fields = SOURCE_FIELDS.iter().map(|f| f.to_string()).collect();
        let reader = open_dataset_with_fields(input, fields)?;

        let mut writer = CsvChunkWriter::create(
            output,
            CleanedRecord::header(self.config.include_id),
            self.config.write_mode,
        )?;
        info!("Writing cleaned records to {:?}", writer.path());

        let stats = self.run_with(reader, &mut writer, progress)?;
        let writer_stats = writer.finish()?;
        debug!("Output writer closed: {:?}", writer_stats);

        Ok(stats)
    }

    /// Run the pipeline over already-parsed records into an open writer
    pub fn run_with<I>(
        &self,
        records: I,
        writer: &mut CsvChunkWriter,
        progress: &dyn ProgressObserver,
    ) -> Result<PipelineStats>
    where
        I: IntoIterator<Item = arxprep_formats::Result<Record>>,
    {
        let chunk_size = self.config.chunk_size;
        let include_id = self.config.include_id;
        let mut records = records.into_iter();
        let mut stats = PipelineStats::default();

        loop {
            let mut chunk = Vec::with_capacity(chunk_size.min(64 * 1024));
            for result in records.by_ref().take(chunk_size) {
                let record = result?;
                chunk.push(SourceRecord::from_record(&record)?);
            }
            if chunk.is_empty() {
                break;
            }

            let read = chunk.len();
            stats.records_read += read;

            let cleaned = self.process_chunk(chunk, &mut stats)?;
            let written = writer.write_chunk(cleaned.iter().map(|r| r.to_row(include_id)))?;
            stats.rows_written += written;
            stats.chunks_processed += 1;

            debug!(
                "Chunk {}: {} read, {} written",
                stats.chunks_processed, read, written
            );
            progress.chunk_processed(read, &stats);
        }

        info!(
            "Processed {} records in {} chunks: {} duplicates, {} empty, {} rows written",
            stats.records_read,
            stats.chunks_processed,
            stats.duplicates_dropped,
            stats.empty_dropped,
            stats.rows_written
        );

        Ok(stats)
    }
}

/// Builder for pipeline configuration
pub struct PipelineBuilder {
    config: PipelineConfig,
    rules: Option<CleaningRules>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
            rules: None,
        }
    }

    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    pub fn dedup_keep(mut self, keep: DedupKeep) -> Self {
        self.config.dedup_keep = keep;
        self
    }

    pub fn drop_empty(mut self, drop_empty: bool) -> Self {
        self.config.drop_empty = drop_empty;
        self
    }

    pub fn include_id(mut self, include_id: bool) -> Self {
        self.config.include_id = include_id;
        self
    }

    pub fn write_mode(mut self, mode: WriteMode) -> Self {
        self.config.write_mode = mode;
        self
    }

    pub fn rules(mut self, rules: CleaningRules) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn build(self) -> Result<Pipeline> {
        Pipeline::new(self.config, self.rules.unwrap_or_default())
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
