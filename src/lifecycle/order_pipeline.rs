use crate::aggregator::OrderAggregator;
use crate::catalog::{CatalogProvider, JsonCatalog};
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::report::{BatchReport, ReportSink};
use crate::source::{self, OrderSource, SourceError};
use tracing::{info, info_span, warn, Instrument};

/// The batch runner for one set of orders.
///
/// `OrderPipeline` is responsible for:
/// - **Precondition checks**: a catalog and a non-empty order source must load, or the run fails
/// - **Error forwarding**: dropped source rows and rejected orders reach the sink one message at a time
/// - **Reporting**: the finished [`BatchReport`] is published to the sink
///
/// # Example
///
/// ```ignore
/// let config = PipelineConfig::default().with_orders_path("today.csv");
/// let pipeline = OrderPipeline::from_config(&config)?;
///
/// let mut sink = ConsoleReport::stdout();
/// let stats = pipeline.run(&mut sink).await?;
/// ```
pub struct OrderPipeline {
    /// Supplies the product and recipe tables
    catalog: Box<dyn CatalogProvider>,

    /// Supplies the raw order lines
    source: Box<dyn OrderSource>,
}

/// Counts from a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStats {
    /// Order lines handed to the aggregator.
    pub lines: usize,
    pub accepted_orders: usize,
    pub rejected_orders: usize,
    /// Source rows dropped before aggregation.
    pub rejected_rows: usize,
}

impl OrderPipeline {
    pub fn new(catalog: Box<dyn CatalogProvider>, source: Box<dyn OrderSource>) -> Self {
        Self { catalog, source }
    }

    /// Builds a pipeline reading the JSON catalog and the order file named in `config`.
    ///
    /// # Errors
    /// [`SourceError::UnsupportedFormat`] when the order file extension is unknown.
    pub fn from_config(config: &PipelineConfig) -> Result<Self, PipelineError> {
        let catalog = JsonCatalog::new(&config.products_path, &config.recipes_path);
        let source = source::open(&config.orders_path)?;
        Ok(Self::new(Box::new(catalog), source))
    }

    /// Runs the batch to completion.
    ///
    /// 1. Load the catalog
    /// 2. Load the orders, forwarding dropped rows to `sink`
    /// 3. Aggregate, forwarding rejected orders to `sink`
    /// 4. Publish the [`BatchReport`]
    ///
    /// # Returns
    ///
    /// - `Ok(RunStats)` once the report is published, whatever the number of rejected orders
    /// - `Err(PipelineError)` when the catalog or orders are missing or empty, or the sink fails
    pub async fn run<S>(&self, sink: &mut S) -> Result<RunStats, PipelineError>
    where
        S: ReportSink + ?Sized,
    {
        let span = info_span!("run", orders = %self.source.path().display());
        self.execute(sink).instrument(span).await
    }

    async fn execute<S>(&self, sink: &mut S) -> Result<RunStats, PipelineError>
    where
        S: ReportSink + ?Sized,
    {
        // =================================================================
        // Step 1: Reference data
        // =================================================================
        let catalog = self
            .catalog
            .load()
            .instrument(info_span!("catalog"))
            .await?;

        // =================================================================
        // Step 2: Order lines
        // =================================================================
        let loaded = self.source.load().instrument(info_span!("source")).await?;
        for row_error in &loaded.rejected {
            warn!(row = row_error.row, reason = %row_error.reason, "Row dropped");
            sink.report_error(&row_error.to_string());
        }
        if loaded.lines.is_empty() {
            return Err(SourceError::Empty(self.source.path().to_path_buf()).into());
        }
        info!(
            lines = loaded.lines.len(),
            dropped = loaded.rejected.len(),
            "Orders loaded"
        );

        // =================================================================
        // Step 3: Validate and aggregate
        // =================================================================
        let aggregation = info_span!("aggregate").in_scope(|| {
            OrderAggregator::new(&catalog).process_valid_orders(&loaded.lines, &mut *sink)
        });

        let stats = RunStats {
            lines: loaded.lines.len(),
            accepted_orders: aggregation.summaries.len(),
            rejected_orders: aggregation.rejected_groups,
            rejected_rows: loaded.rejected.len(),
        };

        // =================================================================
        // Step 4: Report
        // =================================================================
        let report = BatchReport::new(aggregation, loaded.rejected.len());
        sink.publish(&report)?;

        info!(
            accepted = stats.accepted_orders,
            rejected = stats.rejected_orders,
            grand_total = %report.grand_total,
            "Run complete"
        );
        Ok(stats)
    }
}
