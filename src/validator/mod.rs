//! Pure order validation.
//!
//! [`OrderValidator`] checks single lines for well-formedness and order groups
//! for cross-line consistency. It never logs or mutates anything; callers
//! decide how to surface the returned errors.

pub mod error;

pub use error::*;

use crate::catalog::Catalog;
use crate::model::RawOrderLine;

/// Validates order lines against the [`Catalog`].
#[derive(Debug, Clone, Copy)]
pub struct OrderValidator<'a> {
    catalog: &'a Catalog,
}

impl<'a> OrderValidator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Checks one line.
    ///
    /// Every rule is evaluated so several errors can be returned together.
    /// The catalog lookup is skipped when the product id is blank.
    pub fn validate_order(&self, line: &RawOrderLine) -> LineValidation {
        let mut errors = Vec::new();

        if line.order_id.is_blank() {
            errors.push(ValidationError::BlankOrderId);
        }
        if line.product_id.is_blank() {
            errors.push(ValidationError::BlankProductId);
        }
        if line.quantity <= 0 {
            errors.push(ValidationError::NonPositiveQuantity(line.quantity));
        }
        if line.delivery_address.trim().is_empty() {
            errors.push(ValidationError::BlankDeliveryAddress);
        }
        if !line.product_id.is_blank() && !self.catalog.contains(&line.product_id) {
            errors.push(ValidationError::UnknownProduct(line.product_id.clone()));
        }

        match ValidationErrors::from_vec(errors) {
            Some(errors) => Err(errors),
            None => Ok(()),
        }
    }

    /// Checks every line of one order group, then the group's consistency.
    ///
    /// Per-line errors are tagged with the owning order id. The delivery
    /// details check runs only when all lines passed and there is more than
    /// one line; a mismatch yields a single error for the whole group.
    pub fn validate_group(&self, lines: &[&RawOrderLine]) -> GroupValidation {
        let mut errors: Vec<GroupError> = Vec::new();

        for line in lines {
            if let Err(line_errors) = self.validate_order(line) {
                errors.extend(line_errors.into_iter().map(|error| GroupError {
                    order_id: line.order_id.clone(),
                    error,
                }));
            }
        }

        if errors.is_empty() {
            if let [first, rest @ ..] = lines {
                if rest.iter().any(|line| !first.same_delivery_details(line)) {
                    errors.push(GroupError {
                        order_id: first.order_id.clone(),
                        error: ValidationError::InconsistentDeliveryDetails,
                    });
                }
            }
        }

        match ValidationErrors::from_vec(errors) {
            Some(errors) => Err(errors),
            None => Ok(()),
        }
    }
}
