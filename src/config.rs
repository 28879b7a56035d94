//! Run configuration: where the catalog and orders live and where results go.

use std::path::{Path, PathBuf};

/// Directory searched for data files when none is given.
pub const DEFAULT_DATA_DIR: &str = "data";

pub const PRODUCTS_FILE: &str = "products.json";
pub const RECIPES_FILE: &str = "recipes.json";
pub const ORDERS_FILE: &str = "orders.json";

/// File locations for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub products_path: PathBuf,
    pub recipes_path: PathBuf,
    pub orders_path: PathBuf,
    /// Write the report as JSON to this file; `None` prints it to stdout.
    pub json_output: Option<PathBuf>,
}

impl PipelineConfig {
    /// Standard file names inside `dir`.
    pub fn from_data_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            products_path: dir.join(PRODUCTS_FILE),
            recipes_path: dir.join(RECIPES_FILE),
            orders_path: dir.join(ORDERS_FILE),
            json_output: None,
        }
    }

    /// Reads orders from `path` instead of the default location.
    pub fn with_orders_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.orders_path = path.into();
        self
    }

    pub fn with_json_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.json_output = Some(path.into());
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from_data_dir(DEFAULT_DATA_DIR)
    }
}
