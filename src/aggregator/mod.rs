//! # Order Aggregation
//!
//! Turns raw order lines into validated [`OrderSummary`] records and the
//! ingredient demand they imply.
//!
//! ## Algorithm
//!
//! 1. Group lines by order id, keeping first-seen order for groups and for lines within a group.
//! 2. Validate each group with [`OrderValidator::validate_group`].
//! 3. Rejected groups: every error goes to the [`ErrorSink`] and the group is dropped.
//! 4. Accepted groups: quantities are summed per product, items priced from the
//!    catalog, and the group's ingredient demand computed into a local
//!    [`IngredientTotals`] that is merged into the run total only once the
//!    summary is complete.
//! 5. Sums use checked arithmetic. A group whose quantities, prices or
//!    ingredient amounts leave the representable range is rejected like an
//!    invalid one, and contributes nothing.
//!
//! A bad group never aborts the run. All state lives in the call; running the
//! same input twice yields the same result.

use crate::catalog::Catalog;
use crate::model::{IngredientTotals, OrderId, OrderItem, OrderSummary, ProductId, RawOrderLine};
use crate::report::ErrorSink;
use crate::validator::{GroupError, OrderValidator, ValidationError};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// Result of one aggregation pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Aggregation {
    /// One summary per accepted order group, in first-seen order.
    pub summaries: Vec<OrderSummary>,
    /// Ingredient demand across all accepted groups.
    pub ingredient_totals: IngredientTotals,
    /// Sum of every accepted summary's total price.
    pub grand_total: Decimal,
    /// Number of order groups that failed validation.
    pub rejected_groups: usize,
}

/// Lines sharing one order id, in input order.
#[derive(Debug)]
pub struct OrderGroup<'l> {
    pub order_id: &'l OrderId,
    pub lines: Vec<&'l RawOrderLine>,
}

/// Groups `lines` by order id.
///
/// Groups appear in the order their first line appears; lines keep their
/// relative order inside each group.
pub fn group_by_order(lines: &[RawOrderLine]) -> Vec<OrderGroup<'_>> {
    let mut index: HashMap<&OrderId, usize> = HashMap::new();
    let mut groups: Vec<OrderGroup<'_>> = Vec::new();

    for line in lines {
        match index.get(&line.order_id) {
            Some(&i) => groups[i].lines.push(line),
            None => {
                index.insert(&line.order_id, groups.len());
                groups.push(OrderGroup {
                    order_id: &line.order_id,
                    lines: vec![line],
                });
            }
        }
    }
    groups
}

/// The pipeline core: validation plus consolidation against a [`Catalog`].
pub struct OrderAggregator<'a> {
    catalog: &'a Catalog,
    validator: OrderValidator<'a>,
}

impl<'a> OrderAggregator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            validator: OrderValidator::new(catalog),
        }
    }

    /// Processes a batch of lines.
    ///
    /// Every validation error of a rejected group is passed to `errors` as its
    /// own message. Rejected groups contribute nothing to the result.
    #[instrument(skip_all, fields(lines = lines.len()))]
    pub fn process_valid_orders<S: ErrorSink + ?Sized>(
        &self,
        lines: &[RawOrderLine],
        errors: &mut S,
    ) -> Aggregation {
        let mut aggregation = Aggregation::default();

        for group in group_by_order(lines) {
            let rejected: Vec<GroupError> = match self.validator.validate_group(&group.lines) {
                Err(group_errors) => group_errors.into_vec(),
                Ok(()) => match self.accept(&group, &mut aggregation) {
                    Ok(()) => continue,
                    Err(error) => vec![GroupError {
                        order_id: group.order_id.clone(),
                        error,
                    }],
                },
            };

            warn!(
                order_id = %group.order_id,
                errors = rejected.len(),
                "Order rejected"
            );
            for error in &rejected {
                errors.report_error(&error.to_string());
            }
            aggregation.rejected_groups += 1;
        }

        info!(
            accepted = aggregation.summaries.len(),
            rejected = aggregation.rejected_groups,
            ingredients = aggregation.ingredient_totals.len(),
            "Aggregation complete"
        );
        aggregation
    }

    /// Consolidates a validated group and folds it into `aggregation`.
    ///
    /// `aggregation` is only modified when every sum stays in range.
    fn accept(
        &self,
        group: &OrderGroup<'_>,
        aggregation: &mut Aggregation,
    ) -> Result<(), ValidationError> {
        let (summary, demand) = self.consolidate(group)?;
        let grand_total = aggregation
            .grand_total
            .checked_add(summary.total_price)
            .ok_or_else(|| ValidationError::OutOfRange("grand total".to_string()))?;
        aggregation.ingredient_totals.merge(demand)?;
        aggregation.grand_total = grand_total;

        debug!(
            order_id = %summary.order_id,
            items = summary.items.len(),
            total = %summary.total_price,
            "Order accepted"
        );
        aggregation.summaries.push(summary);
        Ok(())
    }

    /// Builds the summary and ingredient demand of an already validated group.
    fn consolidate(
        &self,
        group: &OrderGroup<'_>,
    ) -> Result<(OrderSummary, IngredientTotals), ValidationError> {
        let first = group.lines[0];

        // Per-product quantity sums, products in first-seen order.
        let mut quantities: Vec<(&ProductId, i64)> = Vec::new();
        for line in &group.lines {
            match quantities.iter_mut().find(|(id, _)| *id == &line.product_id) {
                Some((product_id, quantity)) => {
                    *quantity = quantity
                        .checked_add(line.quantity)
                        .ok_or_else(|| out_of_range("quantity", product_id))?;
                }
                None => quantities.push((&line.product_id, line.quantity)),
            }
        }

        let mut items = Vec::with_capacity(quantities.len());
        let mut total_price = Decimal::ZERO;
        let mut demand = IngredientTotals::new();

        for (product_id, quantity) in quantities {
            let Some(product) = self.catalog.product(product_id) else {
                // Unreachable after validation; skip rather than fail.
                warn!(order_id = %group.order_id, %product_id, "Product vanished from catalog");
                continue;
            };
            let item = OrderItem::new(
                product_id.clone(),
                product.name.clone(),
                quantity,
                product.unit_price,
            )
            .ok_or_else(|| out_of_range("line total", product_id))?;
            total_price = total_price
                .checked_add(item.line_total)
                .ok_or_else(|| ValidationError::OutOfRange("order total".to_string()))?;
            items.push(item);

            for requirement in self.catalog.recipe(product_id) {
                let amount = requirement
                    .amount_per_unit
                    .checked_mul(Decimal::from(quantity))
                    .ok_or_else(|| out_of_range("ingredient demand", product_id))?;
                demand.add(&requirement.ingredient_name, amount)?;
            }
        }

        let summary = OrderSummary {
            order_id: group.order_id.clone(),
            items,
            total_price,
            delivery_at: first.delivery_at,
            created_at: first.created_at,
            delivery_address: first.delivery_address.clone(),
        };
        Ok((summary, demand))
    }
}

fn out_of_range(what: &str, product_id: &ProductId) -> ValidationError {
    ValidationError::OutOfRange(format!("{} of product '{}'", what, product_id))
}
