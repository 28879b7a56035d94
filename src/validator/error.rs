//! Validation error types.

use crate::model::{IngredientOverflow, OrderId, ProductId};
use std::fmt::Display;
use thiserror::Error;

/// A single well-formedness or consistency problem.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The order id is empty or whitespace.
    #[error("order id is blank")]
    BlankOrderId,

    /// The product id is empty or whitespace.
    #[error("product id is blank")]
    BlankProductId,

    /// Quantities must be strictly positive.
    #[error("quantity must be positive, got {0}")]
    NonPositiveQuantity(i64),

    /// The delivery address is empty or whitespace.
    #[error("delivery address is blank")]
    BlankDeliveryAddress,

    /// The product id has no catalog entry.
    #[error("unknown product '{0}'")]
    UnknownProduct(ProductId),

    /// Lines of one order disagree on delivery time, creation time or address.
    #[error("inconsistent delivery details")]
    InconsistentDeliveryDetails,

    /// A summed quantity or a price total left the representable range.
    #[error("{0} is out of range")]
    OutOfRange(String),

    /// An ingredient total left the representable range.
    #[error(transparent)]
    IngredientOverflow(#[from] IngredientOverflow),
}

/// A [`ValidationError`] attributed to the order group it came from.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Order {order_id}: {error}")]
pub struct GroupError {
    pub order_id: OrderId,
    pub error: ValidationError,
}

/// Ordered, non-empty list of validation failures.
///
/// Only produced through [`ValidationErrors::from_vec`], which refuses an
/// empty list, so holding one always means validation failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors<E>(Vec<E>);

impl<E> ValidationErrors<E> {
    /// Wraps `errors`, or returns `None` when there are none.
    pub fn from_vec(errors: Vec<E>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    pub fn as_slice(&self) -> &[E] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<E> {
        self.0
    }
}

impl<E> IntoIterator for ValidationErrors<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<E: Display> Display for ValidationErrors<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl<E: std::error::Error> std::error::Error for ValidationErrors<E> {}

/// Outcome of validating a single line.
pub type LineValidation = Result<(), ValidationErrors<ValidationError>>;

/// Outcome of validating an order group.
pub type GroupValidation = Result<(), ValidationErrors<GroupError>>;
