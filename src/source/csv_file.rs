//! CSV order files.

use super::record::RowFields;
use super::{LoadedOrders, OrderSource, RowError, SourceError};
use async_trait::async_trait;
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Reads a CSV file whose header row names the columns.
///
/// Column order does not matter and unknown columns are ignored. Headers may be
/// camelCase (`orderId`) or snake_case (`order_id`).
#[derive(Debug, Clone)]
pub struct CsvOrderSource {
    path: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CsvOrderRecord {
    #[serde(alias = "order_id")]
    order_id: String,
    #[serde(alias = "product_id")]
    product_id: String,
    quantity: String,
    #[serde(alias = "delivery_at")]
    delivery_at: String,
    #[serde(alias = "created_at")]
    created_at: String,
    #[serde(alias = "delivery_address")]
    delivery_address: String,
}

impl CsvOrderSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Decodes comma-separated order data from `reader`.
///
/// Fails only when the header row cannot be read; every bad data row
/// becomes a [`RowError`] numbered from 1.
pub fn parse_csv_orders<R: Read>(reader: R) -> Result<LoadedOrders, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);
    reader.headers()?;

    let mut loaded = LoadedOrders::default();
    for (i, result) in reader.deserialize::<CsvOrderRecord>().enumerate() {
        let row = i + 1;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                loaded.rejected.push(RowError {
                    row,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let fields = RowFields {
            order_id: &record.order_id,
            product_id: &record.product_id,
            quantity: &record.quantity,
            delivery_at: &record.delivery_at,
            created_at: &record.created_at,
            delivery_address: &record.delivery_address,
        };
        match fields.into_line(row) {
            Ok(line) => loaded.lines.push(line),
            Err(e) => loaded.rejected.push(e),
        }
    }
    Ok(loaded)
}

#[async_trait]
impl OrderSource for CsvOrderSource {
    fn path(&self) -> &Path {
        &self.path
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<LoadedOrders, SourceError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;
        let loaded = parse_csv_orders(bytes.as_slice()).map_err(|e| {
            SourceError::Parse {
                path: self.path.clone(),
                reason: e.to_string(),
            }
        })?;
        debug!(
            lines = loaded.lines.len(),
            rejected = loaded.rejected.len(),
            "CSV orders decoded"
        );
        loaded.require_rows(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_driven_mapping() {
        let data = "\
quantity,deliveryAddress,orderId,productId,createdAt,deliveryAt,notes
2, 1 Main St ,ORD1,P001,2024-03-15 12:00,2024-03-15 18:00,ring twice
1,2 High St,ORD2,P002,2024-03-15 12:30,2024-03-15 19:00,
";
        let loaded = parse_csv_orders(data.as_bytes()).unwrap();

        assert!(loaded.rejected.is_empty());
        assert_eq!(loaded.lines.len(), 2);
        assert_eq!(loaded.lines[0].order_id.as_str(), "ORD1");
        assert_eq!(loaded.lines[0].quantity, 2);
        assert_eq!(loaded.lines[0].delivery_address, "1 Main St");
    }

    #[test]
    fn test_snake_case_headers() {
        let data = "\
order_id,product_id,quantity,delivery_at,created_at,delivery_address
ORD1,P001,3,2024-03-15 18:00,2024-03-15 12:00,1 Main St
";
        let loaded = parse_csv_orders(data.as_bytes()).unwrap();
        assert_eq!(loaded.lines.len(), 1);
        assert_eq!(loaded.lines[0].quantity, 3);
    }

    #[test]
    fn test_missing_text_column_passes_through_blank() {
        let data = "\
orderId,productId,quantity,deliveryAt,createdAt
ORD1,P001,1,2024-03-15 18:00,2024-03-15 12:00
";
        let loaded = parse_csv_orders(data.as_bytes()).unwrap();
        assert_eq!(loaded.lines.len(), 1);
        assert_eq!(loaded.lines[0].delivery_address, "");
    }

    #[test]
    fn test_unparsable_typed_columns_drop_the_row() {
        let data = "\
orderId,productId,quantity,deliveryAt,createdAt,deliveryAddress
ORD1,P001,x,2024-03-15 18:00,2024-03-15 12:00,1 Main St
ORD2,P001,1,later,2024-03-15 12:00,1 Main St
ORD3,P001,1,2024-03-15 18:00,2024-03-15 12:00,1 Main St
";
        let loaded = parse_csv_orders(data.as_bytes()).unwrap();

        assert_eq!(loaded.lines.len(), 1);
        assert_eq!(loaded.lines[0].order_id.as_str(), "ORD3");
        let rows: Vec<usize> = loaded.rejected.iter().map(|e| e.row).collect();
        assert_eq!(rows, vec![1, 2]);
    }
}
