//! # Test Doubles
//!
//! In-memory stand-ins for the pipeline's collaborators, so the
//! [`OrderPipeline`](crate::lifecycle::OrderPipeline) can be exercised without files.
//!
//! - [`StaticCatalog`] serves a fixed [`Catalog`].
//! - [`MockOrderSource`] serves canned lines, or fails the way a real source would.
//! - [`RecordingSink`] keeps every error message and published report.
//!
//! # Example
//! ```ignore
//! let source = MockOrderSource::with_lines(lines);
//! let pipeline = OrderPipeline::new(Box::new(StaticCatalog::new(catalog)), Box::new(source.clone()));
//!
//! let mut sink = RecordingSink::default();
//! pipeline.run(&mut sink).await?;
//! assert_eq!(source.calls(), 1); // the source was consulted exactly once
//! ```

use crate::catalog::{Catalog, CatalogError, CatalogProvider};
use crate::model::RawOrderLine;
use crate::report::{BatchReport, ErrorSink, ReportError, ReportSink};
use crate::source::{LoadedOrders, OrderSource, RowError, SourceError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A [`CatalogProvider`] returning a clone of a prepared catalog.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    catalog: Catalog,
}

impl StaticCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalog {
    async fn load(&self) -> Result<Catalog, CatalogError> {
        Ok(self.catalog.clone())
    }
}

/// What a [`MockOrderSource`] answers with.
#[derive(Debug, Clone)]
enum Response {
    Orders(LoadedOrders),
    Missing,
    Empty,
}

/// An [`OrderSource`] with a canned response and a call counter.
///
/// Clones share the counter, so a clone kept by the test observes calls made
/// through the copy handed to the pipeline.
#[derive(Debug, Clone)]
pub struct MockOrderSource {
    path: PathBuf,
    response: Response,
    calls: Arc<AtomicUsize>,
}

impl MockOrderSource {
    fn with_response(response: Response) -> Self {
        Self {
            path: PathBuf::from("mock://orders"),
            response,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Serves `lines` with no dropped rows.
    pub fn with_lines(lines: Vec<RawOrderLine>) -> Self {
        Self::with_response(Response::Orders(LoadedOrders {
            lines,
            rejected: Vec::new(),
        }))
    }

    /// Serves `lines` alongside rows the "file" could not type.
    pub fn with_rejected_rows(lines: Vec<RawOrderLine>, rejected: Vec<RowError>) -> Self {
        Self::with_response(Response::Orders(LoadedOrders { lines, rejected }))
    }

    /// Fails like a source whose file does not exist.
    pub fn missing() -> Self {
        Self::with_response(Response::Missing)
    }

    /// Fails like a source whose file has no rows.
    pub fn empty() -> Self {
        Self::with_response(Response::Empty)
    }

    /// Number of times `load` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrderSource for MockOrderSource {
    fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<LoadedOrders, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Response::Orders(loaded) => Ok(loaded.clone()),
            Response::Missing => Err(SourceError::Io {
                path: self.path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "mock source missing"),
            }),
            Response::Empty => Err(SourceError::Empty(self.path.clone())),
        }
    }
}

/// A [`ReportSink`] that records everything it is given.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub errors: Vec<String>,
    pub reports: Vec<BatchReport>,
}

impl RecordingSink {
    /// The most recently published report, if any.
    pub fn last_report(&self) -> Option<&BatchReport> {
        self.reports.last()
    }
}

impl ErrorSink for RecordingSink {
    fn report_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

impl ReportSink for RecordingSink {
    fn publish(&mut self, report: &BatchReport) -> Result<(), ReportError> {
        self.reports.push(report.clone());
        Ok(())
    }
}
