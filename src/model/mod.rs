//! Plain data records flowing through the pipeline.
//!
//! Raw input ([`RawOrderLine`]), reference data ([`Product`], [`IngredientRequirement`])
//! and the derived results ([`OrderItem`], [`OrderSummary`], [`IngredientTotals`]).

pub mod ingredient;
pub mod order;
pub mod product;
pub mod timestamp;

pub use ingredient::*;
pub use order::*;
pub use product::*;
pub use timestamp::*;
