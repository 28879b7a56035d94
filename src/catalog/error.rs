//! Error types for catalog loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while acquiring the reference catalog.
///
/// All of these are precondition failures: the run cannot start without a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The product table has no entries.
    #[error("product catalog is empty")]
    EmptyProducts,

    /// The recipe table has no entries.
    #[error("recipe catalog is empty")]
    EmptyRecipes,

    /// A catalog file could not be read.
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A catalog file is not valid JSON of the expected shape.
    #[error("failed to parse catalog file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
