//! Conversion of one untyped input row into a [`RawOrderLine`].

use super::RowError;
use crate::model::{parse_timestamp, RawOrderLine};

/// Text fields of one input row, as found in the file.
///
/// Text columns pass through unchanged, blanks included, so the validator
/// can report them. Quantity and timestamps must parse or the row is dropped.
#[derive(Debug, Default)]
pub(crate) struct RowFields<'a> {
    pub order_id: &'a str,
    pub product_id: &'a str,
    pub quantity: &'a str,
    pub delivery_at: &'a str,
    pub created_at: &'a str,
    pub delivery_address: &'a str,
}

impl RowFields<'_> {
    pub(crate) fn into_line(self, row: usize) -> Result<RawOrderLine, RowError> {
        let fail = |reason: String| RowError { row, reason };

        let quantity = self.quantity.trim();
        if quantity.is_empty() {
            return Err(fail("quantity is missing".to_string()));
        }
        let quantity: i64 = quantity
            .parse()
            .map_err(|_| fail(format!("quantity '{}' is not an integer", quantity)))?;

        let delivery_at = parse_timestamp(self.delivery_at)
            .ok_or_else(|| fail(format!("deliveryAt '{}' is not a timestamp", self.delivery_at)))?;
        let created_at = parse_timestamp(self.created_at)
            .ok_or_else(|| fail(format!("createdAt '{}' is not a timestamp", self.created_at)))?;

        Ok(RawOrderLine::new(
            self.order_id,
            self.product_id,
            quantity,
            delivery_at,
            created_at,
            self.delivery_address,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields<'a>(quantity: &'a str, delivery_at: &'a str) -> RowFields<'a> {
        RowFields {
            order_id: "ORD1",
            product_id: "P001",
            quantity,
            delivery_at,
            created_at: "2024-03-15 12:00",
            delivery_address: "1 Main St",
        }
    }

    #[test]
    fn test_typed_fields_are_parsed() {
        let line = fields(" 3 ", "2024-03-15 18:00").into_line(1).unwrap();
        assert_eq!(line.quantity, 3);
        assert_eq!(line.order_id.as_str(), "ORD1");
    }

    #[test]
    fn test_negative_quantity_passes_through_to_validation() {
        let line = fields("-2", "2024-03-15 18:00").into_line(1).unwrap();
        assert_eq!(line.quantity, -2);
    }

    #[test]
    fn test_blank_text_fields_pass_through() {
        let row = RowFields {
            quantity: "1",
            delivery_at: "2024-03-15 18:00",
            created_at: "2024-03-15 12:00",
            ..RowFields::default()
        };
        let line = row.into_line(4).unwrap();
        assert!(line.order_id.is_blank());
        assert_eq!(line.delivery_address, "");
    }

    #[test]
    fn test_bad_quantity_fails_row() {
        assert_eq!(
            fields("two", "2024-03-15 18:00").into_line(2).unwrap_err(),
            RowError {
                row: 2,
                reason: "quantity 'two' is not an integer".to_string()
            }
        );
        assert_eq!(
            fields("", "2024-03-15 18:00").into_line(2).unwrap_err().reason,
            "quantity is missing"
        );
        assert!(fields("1.5", "2024-03-15 18:00").into_line(2).is_err());
    }

    #[test]
    fn test_bad_timestamp_fails_row() {
        let error = fields("1", "soon").into_line(7).unwrap_err();
        assert_eq!(error.to_string(), "Row 7: deliveryAt 'soon' is not a timestamp");
    }
}
