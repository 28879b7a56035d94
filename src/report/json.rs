//! JSON report file.

use super::{BatchReport, ErrorSink, ReportError, ReportSink};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Collects errors and writes them together with the [`BatchReport`] to a file.
#[derive(Debug)]
pub struct JsonReport {
    path: PathBuf,
    errors: Vec<String>,
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    #[serde(flatten)]
    report: &'a BatchReport,
    errors: &'a [String],
}

impl JsonReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            errors: Vec::new(),
        }
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

impl ErrorSink for JsonReport {
    fn report_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

impl ReportSink for JsonReport {
    fn publish(&mut self, report: &BatchReport) -> Result<(), ReportError> {
        let document = JsonDocument {
            report,
            errors: &self.errors,
        };
        let body = serde_json::to_string_pretty(&document)?;
        std::fs::write(&self.path, body).map_err(|source| ReportError::File {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), orders = report.summaries.len(), "JSON report written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IngredientTotals;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[test]
    fn test_writes_report_and_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        let mut sink = JsonReport::new(&path);
        sink.report_error("Order ORD2: delivery address is blank");

        let mut totals = IngredientTotals::new();
        totals.add("Mozzarella", dec!(2.20)).unwrap();
        let report = BatchReport {
            summaries: Vec::new(),
            ingredient_totals: totals,
            grand_total: Decimal::ZERO,
            rejected_groups: 1,
            rejected_rows: 0,
        };
        sink.publish(&report).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["rejected_groups"], 1);
        assert_eq!(written["ingredient_totals"]["Mozzarella"], "2.20");
        assert_eq!(
            written["errors"][0],
            "Order ORD2: delivery address is blank"
        );
    }

    #[test]
    fn test_unwritable_path_is_file_error() {
        let dir = TempDir::new().unwrap();
        let mut sink = JsonReport::new(dir.path().join("missing").join("report.json"));
        let report = BatchReport {
            summaries: Vec::new(),
            ingredient_totals: IngredientTotals::new(),
            grand_total: Decimal::ZERO,
            rejected_groups: 0,
            rejected_rows: 0,
        };
        assert!(matches!(
            sink.publish(&report),
            Err(ReportError::File { .. })
        ));
    }
}
