//! Chunk-local deduplication on `(title, abstract)`
//!
//! Only records within the same chunk are compared. A pair split across
//! two chunks survives twice; memory stays bounded by the chunk size.

use crate::record::SourceRecord;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which occurrence of a duplicated record is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DedupKeep {
    /// Keep the first occurrence
    #[default]
    First,
    /// Keep the last occurrence, at its own position in the chunk
    Last,
}

/// Statistics for deduplication
#[derive(Debug, Clone, Default)]
pub struct DedupStats {
    /// Total number of records seen
    pub total_seen: usize,
    /// Number of duplicates dropped
    pub duplicates_found: usize,
}

impl DedupStats {
    /// Get the deduplication rate as a percentage
    pub fn dedup_rate(&self) -> f64 {
        if self.total_seen == 0 {
            0.0
        } else {
            (self.duplicates_found as f64 / self.total_seen as f64) * 100.0
        }
    }
}

/// Drops exact `(title, abstract)` duplicates from each chunk it is given
#[derive(Debug, Default)]
pub struct ChunkDeduplicator {
    keep: DedupKeep,
    stats: DedupStats,
}

impl ChunkDeduplicator {
    pub fn new(keep: DedupKeep) -> Self {
        Self {
            keep,
            stats: DedupStats::default(),
        }
    }

    /// Deduplicate one chunk, preserving the order of the survivors.
    pub fn dedup(&mut self, chunk: Vec<SourceRecord>) -> Vec<SourceRecord> {
        let total = chunk.len();
        let mask = self.survivors(&chunk);

        let unique: Vec<SourceRecord> = chunk
            .into_iter()
            .zip(mask)
            .filter_map(|(record, keep)| keep.then_some(record))
            .collect();

        let dropped = total - unique.len();
        self.stats.total_seen += total;
        self.stats.duplicates_found += dropped;

        if dropped > 0 {
            debug!(
                "Dropped {} duplicate records from chunk of {} ({:.1}% overall)",
                dropped,
                total,
                self.stats.dedup_rate()
            );
        }

        unique
    }

    fn survivors(&self, chunk: &[SourceRecord]) -> Vec<bool> {
        let mut seen: AHashSet<(Option<&str>, Option<&str>)> = AHashSet::with_capacity(chunk.len());
        let mut mask = vec![false; chunk.len()];

        let mut visit = |index: usize| {
            let record = &chunk[index];
            mask[index] = seen.insert((record.title.as_deref(), record.abstract_text.as_deref()));
        };

        match self.keep {
            DedupKeep::First => (0..chunk.len()).for_each(&mut visit),
            DedupKeep::Last => (0..chunk.len()).rev().for_each(&mut visit),
        }

        mask
    }

    /// Get current statistics
    pub fn stats(&self) -> &DedupStats {
        &self.stats
    }
}
