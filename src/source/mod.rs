//! Order sources: turn order files into typed [`RawOrderLine`]s.
//!
//! Two formats are supported, chosen by file extension in [`open`]:
//!
//! - `.json` → [`JsonOrderSource`]
//! - `.csv` → [`CsvOrderSource`]
//!
//! Rows that cannot be typed (bad quantity, bad timestamp, wrong shape) are
//! returned as [`RowError`]s next to the good lines. Blank text fields are not
//! a source concern and reach the validator unchanged.

mod csv_file;
pub mod error;
mod json_file;
mod record;

pub use csv_file::*;
pub use error::*;
pub use json_file::*;

use crate::model::RawOrderLine;
use async_trait::async_trait;
use std::path::Path;

/// Lines read from a source, plus the rows that had to be dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedOrders {
    pub lines: Vec<RawOrderLine>,
    pub rejected: Vec<RowError>,
}

impl LoadedOrders {
    /// Fails with [`SourceError::Empty`] when the file had no data rows at all.
    pub fn require_rows(self, path: &Path) -> Result<Self, SourceError> {
        if self.lines.is_empty() && self.rejected.is_empty() {
            Err(SourceError::Empty(path.to_path_buf()))
        } else {
            Ok(self)
        }
    }
}

/// Anything that can produce the batch of order lines for a run.
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// Where the orders come from, for logs and errors.
    fn path(&self) -> &Path;

    async fn load(&self) -> Result<LoadedOrders, SourceError>;
}

/// Picks the source implementation for `path` by its extension.
pub fn open(path: &Path) -> Result<Box<dyn OrderSource>, SourceError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => Ok(Box::new(JsonOrderSource::new(path))),
        Some("csv") => Ok(Box::new(CsvOrderSource::new(path))),
        _ => Err(SourceError::UnsupportedFormat(path.to_path_buf())),
    }
}
