//! JSON order files.

use super::record::RowFields;
use super::{LoadedOrders, OrderSource, RowError, SourceError};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Reads a JSON array of order line objects.
///
/// ```text
/// [ { "orderId": "ORD1", "productId": "P001", "quantity": 2,
///     "deliveryAt": "2024-03-15 18:00", "createdAt": "2024-03-15 12:00",
///     "deliveryAddress": "1 Main St" } ]
/// ```
///
/// Snake-case keys are accepted too. Each element is decoded on its own, so a
/// malformed element only drops that element.
#[derive(Debug, Clone)]
pub struct JsonOrderSource {
    path: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct JsonOrderRecord {
    #[serde(alias = "order_id")]
    order_id: String,
    #[serde(alias = "product_id")]
    product_id: String,
    quantity: Value,
    #[serde(alias = "delivery_at")]
    delivery_at: String,
    #[serde(alias = "created_at")]
    created_at: String,
    #[serde(alias = "delivery_address")]
    delivery_address: String,
}

impl JsonOrderSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Decodes the text of a JSON order file.
///
/// Fails only when the document is not a JSON array; bad elements become
/// [`RowError`]s.
pub fn parse_json_orders(text: &str) -> Result<LoadedOrders, String> {
    let elements: Vec<Value> = serde_json::from_str(text).map_err(|e| e.to_string())?;
    let mut loaded = LoadedOrders::default();

    for (i, element) in elements.into_iter().enumerate() {
        let row = i + 1;
        let record: JsonOrderRecord = match serde_json::from_value(element) {
            Ok(record) => record,
            Err(e) => {
                loaded.rejected.push(RowError {
                    row,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let quantity = match &record.quantity {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => {
                loaded.rejected.push(RowError {
                    row,
                    reason: format!("quantity must be an integer, got {}", json_type(other)),
                });
                continue;
            }
        };
        let fields = RowFields {
            order_id: &record.order_id,
            product_id: &record.product_id,
            quantity: &quantity,
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

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[async_trait]
impl OrderSource for JsonOrderSource {
    fn path(&self) -> &Path {
        &self.path
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<LoadedOrders, SourceError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;
        let loaded = parse_json_orders(&text).map_err(|reason| SourceError::Parse {
            path: self.path.clone(),
            reason,
        })?;
        debug!(
            lines = loaded.lines.len(),
            rejected = loaded.rejected.len(),
            "JSON orders decoded"
        );
        loaded.require_rows(&self.path)
    }
}
