//! Plain-text report rendering.

use super::{BatchReport, ErrorSink, ReportError, ReportSink};
use std::io::Write;
use tracing::warn;

/// Renders errors and results as text.
///
/// Errors are written immediately as they arrive. Amounts are shown with two
/// decimal places.
pub struct ConsoleReport<W: Write> {
    out: W,
    errors: usize,
}

impl ConsoleReport<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleReport<W> {
    pub fn new(out: W) -> Self {
        Self { out, errors: 0 }
    }

    /// Number of error messages written so far.
    pub fn error_count(&self) -> usize {
        self.errors
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self, report: &BatchReport) -> std::io::Result<()> {
        let out = &mut self.out;

        writeln!(out, "=== Orders ({}) ===", report.summaries.len())?;
        for summary in report.summaries_by_delivery() {
            writeln!(out)?;
            writeln!(
                out,
                "Order {}  deliver {}  placed {}",
                summary.order_id,
                summary.delivery_at.format("%Y-%m-%d %H:%M"),
                summary.created_at.format("%Y-%m-%d %H:%M"),
            )?;
            writeln!(out, "  To: {}", summary.delivery_address)?;
            for item in &summary.items {
                writeln!(
                    out,
                    "  {:<8} {:<24} {:>4} x {:>8.2} = {:>9.2}",
                    item.product_id.as_str(),
                    item.product_name,
                    item.quantity,
                    item.unit_price,
                    item.line_total,
                )?;
            }
            writeln!(out, "  Total: {:.2}", summary.total_price)?;
        }

        writeln!(out)?;
        writeln!(out, "Grand total: {:.2}", report.grand_total)?;
        if report.rejected_groups > 0 || report.rejected_rows > 0 {
            writeln!(
                out,
                "Rejected: {} order(s), {} row(s)",
                report.rejected_groups, report.rejected_rows
            )?;
        }

        writeln!(out)?;
        writeln!(out, "=== Ingredients ===")?;
        for (ingredient, amount) in report.ingredient_totals.iter() {
            writeln!(out, "  {:<24} {:>10.2}", ingredient, amount)?;
        }
        out.flush()
    }
}

impl<W: Write> ErrorSink for ConsoleReport<W> {
    fn report_error(&mut self, message: &str) {
        self.errors += 1;
        if let Err(e) = writeln!(self.out, "ERROR: {}", message) {
            warn!(error = %e, "Failed to write error message");
        }
    }
}

impl<W: Write + Send> ReportSink for ConsoleReport<W> {
    fn publish(&mut self, report: &BatchReport) -> Result<(), ReportError> {
        self.render(report)?;
        Ok(())
    }
}
