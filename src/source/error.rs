//! Error types for order sources.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop an order source from producing any lines.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The order file could not be read.
    #[error("failed to read order file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file as a whole is not in the expected shape.
    #[error("failed to parse order file {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// The file extension does not map to a known format.
    #[error("unsupported order file format: {0}")]
    UnsupportedFormat(PathBuf),

    /// No usable order lines were found.
    #[error("order source {0} contains no orders")]
    Empty(PathBuf),
}

/// A single input row that was dropped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Row {row}: {reason}")]
pub struct RowError {
    /// 1-based position of the row among the data rows/elements.
    pub row: usize,
    pub reason: String,
}
