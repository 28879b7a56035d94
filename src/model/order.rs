//! Order records, raw and derived.
//!
//! A [`RawOrderLine`] is one product line of a customer order as read from the
//! source. Lines sharing an [`OrderId`] form an order group, which the
//! [`OrderAggregator`](crate::aggregator::OrderAggregator) turns into a single
//! [`OrderSummary`].

use crate::model::ProductId;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the identifier is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOrderLine {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i64,
    pub delivery_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub delivery_address: String,
}

impl RawOrderLine {
    /// Creates a new RawOrderLine.
    ///
    /// # Arguments
    /// * `order_id` - Identifier shared by every line of the same order
    /// * `product_id` - Catalog key of the ordered product
    /// * `quantity` - Units ordered on this line
    /// * `delivery_at` - Requested delivery time
    /// * `created_at` - Time the order was placed
    /// * `delivery_address` - Where the order goes
    pub fn new(
        order_id: impl Into<OrderId>,
        product_id: impl Into<ProductId>,
        quantity: i64,
        delivery_at: NaiveDateTime,
        created_at: NaiveDateTime,
        delivery_address: impl Into<String>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            product_id: product_id.into(),
            quantity,
            delivery_at,
            created_at,
            delivery_address: delivery_address.into(),
        }
    }

    /// True when both lines carry the same delivery time, creation time and address.
    pub fn same_delivery_details(&self, other: &RawOrderLine) -> bool {
        self.delivery_at == other.delivery_at
            && self.created_at == other.created_at
            && self.delivery_address == other.delivery_address
    }
}

/// One consolidated product line of an [`OrderSummary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

impl OrderItem {
    /// Builds an item, computing `line_total = unit_price × quantity`.
    ///
    /// Returns `None` when the line total is out of range.
    pub fn new(
        product_id: ProductId,
        product_name: impl Into<String>,
        quantity: i64,
        unit_price: Decimal,
    ) -> Option<Self> {
        let line_total = unit_price.checked_mul(Decimal::from(quantity))?;
        Some(Self {
            product_id,
            product_name: product_name.into(),
            quantity,
            unit_price,
            line_total,
        })
    }
}

/// A validated, consolidated customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order_id: OrderId,
    pub items: Vec<OrderItem>,
    pub total_price: Decimal,
    pub delivery_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub delivery_address: String,
}

impl OrderSummary {
    /// Looks up the item for `product_id`, if the order contains it.
    pub fn item(&self, product_id: &str) -> Option<&OrderItem> {
        self.items
            .iter()
            .find(|item| item.product_id.as_str() == product_id)
    }
}
