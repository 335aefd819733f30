//! JSON lines sink for chunk records
//!
//! Records are buffered in memory for the whole run and written in one go
//! when the run ends, whether it finished or was interrupted. Each flush
//! truncates the results file; runs never append to each other.

use crate::crawler::ChunkRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while flushing records
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// Buffer of chunk records bound to a results file
#[derive(Debug)]
pub struct JsonlSink {
    path: PathBuf,
    buffer: Vec<ChunkRecord>,
}

impl JsonlSink {
    /// Creates an empty sink that will flush to `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            buffer: Vec::new(),
        }
    }

    /// Appends records, preserving their order
    pub fn extend(&mut self, records: impl IntoIterator<Item = ChunkRecord>) {
        self.buffer.extend(records);
    }

    /// Records buffered so far
    pub fn records(&self) -> &[ChunkRecord] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The results file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes every buffered record as one JSON object per line
    ///
    /// An empty buffer writes nothing and leaves any existing file alone.
    /// Consumes the sink, so a run flushes at most once.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of records written
    /// * `Err(SinkError)` - The file could not be written
    pub fn flush(self) -> SinkResult<usize> {
        if self.is_empty() {
            tracing::warn!("No data to save. The crawler didn't extract any content.");
            return Ok(0);
        }

        let io_error = |source: std::io::Error| SinkError::Io {
            path: self.path.display().to_string(),
            source,
        };

        let file = File::create(&self.path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);

        for record in &self.buffer {
            let line = serde_json::to_string(record)?;
            writer.write_all(line.as_bytes()).map_err(io_error)?;
            writer.write_all(b"\n").map_err(io_error)?;
        }
        writer.flush().map_err(io_error)?;

        tracing::info!("Saved {} items to {}", self.len(), self.path.display());
        Ok(self.len())
    }
}
