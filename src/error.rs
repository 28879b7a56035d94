//! Top-level error type for a pipeline run.

use crate::catalog::CatalogError;
use crate::report::ReportError;
use crate::source::SourceError;
use thiserror::Error;

/// Failures that end a run. Bad individual orders never show up here.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Report(#[from] ReportError),
}
