//! Error types for report sinks.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing rendered output failed.
    #[error("failed to write report: {0}")]
    Write(#[from] std::io::Error),

    /// Writing the JSON report file failed.
    #[error("failed to write report file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serializing the report failed.
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}
