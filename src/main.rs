//! # order-pipeline
//!
//! Command-line entry point. Resolves file locations, runs one batch and
//! renders the result.
//!
//! Exit status is zero whenever the batch completes, even if some orders were
//! rejected; a missing or empty catalog or order file is an error.

use anyhow::Context;
use clap::Parser;
use order_pipeline::config::{PipelineConfig, DEFAULT_DATA_DIR};
use order_pipeline::lifecycle::{setup_tracing, OrderPipeline};
use order_pipeline::report::{ConsoleReport, JsonReport, ReportSink};
use std::path::PathBuf;
use tracing::{error, info};

/// Validate a batch of orders and total up prices and ingredient demand
#[derive(Parser, Debug)]
#[command(name = "order-pipeline", version)]
struct Cli {
    /// Directory holding products.json, recipes.json and orders.json
    #[arg(long, env = "ORDER_PIPELINE_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Order file to process instead of <data-dir>/orders.json (.json or .csv)
    #[arg(short, long)]
    orders: Option<PathBuf>,

    /// Write the report as JSON to this file instead of printing it
    #[arg(long)]
    json_out: Option<PathBuf>,

    /// Enable verbose output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> PipelineConfig {
        let mut config = PipelineConfig::from_data_dir(&self.data_dir);
        if let Some(orders) = &self.orders {
            config = config.with_orders_path(orders);
        }
        if let Some(path) = &self.json_out {
            config = config.with_json_output(path);
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let config = cli.config();
    info!(?config, "Starting order pipeline");

    let mut sink: Box<dyn ReportSink> = match &config.json_output {
        Some(path) => Box::new(JsonReport::new(path)),
        None => Box::new(ConsoleReport::stdout()),
    };

    let pipeline = OrderPipeline::from_config(&config).context("failed to set up pipeline")?;
    match pipeline.run(sink.as_mut()).await {
        Ok(stats) => {
            info!(
                accepted = stats.accepted_orders,
                rejected = stats.rejected_orders,
                dropped_rows = stats.rejected_rows,
                "Batch finished"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Batch failed");
            Err(e).context("order batch failed")
        }
    }
}
