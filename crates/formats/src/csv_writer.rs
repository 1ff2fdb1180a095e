//! Chunked CSV writer
//!
//! The output file is opened once per run. Every chunk is serialized into
//! memory first and then appended with a single write followed by a flush,
//! so a run that dies part-way leaves a file cut at a chunk boundary.
//! The header row is written exactly once.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How an existing output file is treated when the writer opens it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Create the file, discarding previous contents
    #[default]
    Truncate,
    /// Append to the file; the header is skipped if the file is non-empty
    Append,
}

/// Totals for a finished writer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterStats {
    pub chunks_written: usize,
    pub rows_written: u64,
    pub bytes_written: u64,
}

/// Append-only CSV writer that flushes whole chunks.
pub struct CsvChunkWriter {
    file: File,
    path: PathBuf,
    header: Vec<String>,
    header_written: bool,
    stats: WriterStats,
}

impl CsvChunkWriter {
    /// Open `path` for chunked writing with the given column names.
    pub fn create<P, I, S>(path: P, header: I, mode: WriteMode) -> Result<Self>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let path = path.as_ref();
        let header: Vec<String> = header.into_iter().map(Into::into).collect();
        if header.is_empty() {
            return Err(Error::InvalidFile(format!(
                "CSV header for {} has no columns",
                path.display()
            )));
        }

        let (file, header_written) = match mode {
            WriteMode::Truncate => (File::create(path)?, false),
            WriteMode::Append => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                let existing = file.metadata()?.len();
                if existing > 0 {
                    check_existing_header(path, &header)?;
                    info!(
                        "Appending to existing output {:?} ({} bytes), header skipped",
                        path, existing
                    );
                }
                (file, existing > 0)
            }
        };

        Ok(Self {
            file,
            path: path.to_path_buf(),
            header,
            header_written,
            stats: WriterStats::default(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn stats(&self) -> WriterStats {
        self.stats
    }

    /// Serialize one chunk of rows and append it to the file.
    ///
    /// The header goes in front of the first chunk, even an empty one.
    /// Returns the number of rows written.
    pub fn write_chunk<R, T>(&mut self, rows: impl IntoIterator<Item = R>) -> Result<usize>
    where
        R: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let mut buffer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        if !self.header_written {
            buffer.write_record(&self.header)?;
        }

        let mut count = 0;
        for row in rows {
            buffer.write_record(row)?;
            count += 1;
        }

        let bytes = buffer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
        self.file.write_all(&bytes)?;
        self.file.flush()?;

        self.header_written = true;
        self.stats.chunks_written += 1;
        self.stats.rows_written += count as u64;
        self.stats.bytes_written += bytes.len() as u64;

        debug!(
            "Appended chunk {} ({} rows, {} bytes) to {:?}",
            self.stats.chunks_written,
            count,
            bytes.len(),
            self.path
        );

        Ok(count)
    }

    /// Flush and close the file.
    ///
    /// A run that produced no chunks still leaves a header-only file.
    pub fn finish(mut self) -> Result<WriterStats> {
        if !self.header_written {
            self.write_chunk(std::iter::empty::<Vec<&str>>())?;
            self.stats.chunks_written -= 1;
        }
        self.file.sync_all()?;
        Ok(self.stats)
    }
}

/// Appending rows under a different header would mix column layouts.
fn check_existing_header(path: &Path, header: &[String]) -> Result<()> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut existing = csv::StringRecord::new();
    reader.read_record(&mut existing)?;

    if existing.iter().ne(header.iter().map(String::as_str)) {
        return Err(Error::InvalidFile(format!(
            "Cannot append to {}: existing header [{}] does not match [{}]",
            path.display(),
            existing.iter().collect::<Vec<_>>().join(", "),
            header.join(", ")
        )));
    }
    Ok(())
}
