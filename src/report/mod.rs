//! Report sinks: where validation errors and the final results go.
//!
//! The pipeline streams every error message to an [`ErrorSink`] as it is
//! found, then hands the finished [`BatchReport`] to a [`ReportSink`].
//!
//! - [`ConsoleReport`] renders human-readable text to any writer.
//! - [`JsonReport`] writes the report as a JSON document.

pub mod console;
pub mod error;
pub mod json;

pub use console::*;
pub use error::*;
pub use json::*;

use crate::aggregator::Aggregation;
use crate::model::{IngredientTotals, OrderSummary};
use rust_decimal::Decimal;
use serde::Serialize;

/// Receives human-readable error messages, one per problem.
pub trait ErrorSink {
    fn report_error(&mut self, message: &str);
}

impl ErrorSink for Vec<String> {
    fn report_error(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

/// An [`ErrorSink`] that also renders the final results.
pub trait ReportSink: ErrorSink + Send {
    fn publish(&mut self, report: &BatchReport) -> Result<(), ReportError>;
}

/// Everything a finished run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub summaries: Vec<OrderSummary>,
    pub ingredient_totals: IngredientTotals,
    /// Sum of every accepted order's total price.
    pub grand_total: Decimal,
    pub rejected_groups: usize,
    pub rejected_rows: usize,
}

impl BatchReport {
    pub fn new(aggregation: Aggregation, rejected_rows: usize) -> Self {
        Self {
            summaries: aggregation.summaries,
            ingredient_totals: aggregation.ingredient_totals,
            grand_total: aggregation.grand_total,
            rejected_groups: aggregation.rejected_groups,
            rejected_rows,
        }
    }

    /// Summaries in display order: by delivery time, then order id.
    pub fn summaries_by_delivery(&self) -> Vec<&OrderSummary> {
        let mut ordered: Vec<&OrderSummary> = self.summaries.iter().collect();
        ordered.sort_by(|a, b| {
            a.delivery_at
                .cmp(&b.delivery_at)
                .then_with(|| a.order_id.cmp(&b.order_id))
        });
        ordered
    }
}
