//! Run orchestration.
//!
//! - [`OrderPipeline`] wires a catalog provider, an order source and a report
//!   sink around the [`OrderAggregator`](crate::aggregator::OrderAggregator).
//! - [`setup_tracing`] initializes logging for the binary.

pub mod order_pipeline;
pub mod tracing;

pub use order_pipeline::*;
pub use self::tracing::*;
