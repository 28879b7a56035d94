//! The reference catalog: products and their ingredient recipes.
//!
//! A [`Catalog`] is built once per run by a [`CatalogProvider`] and only read
//! afterwards. Construction enforces the precondition that neither table is empty.

pub mod error;
pub mod loader;

pub use error::*;
pub use loader::*;

use crate::model::{IngredientRequirement, Product, ProductId};
use async_trait::async_trait;
use std::collections::HashMap;

/// Immutable product and recipe tables, keyed by product id.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: HashMap<ProductId, Product>,
    recipes: HashMap<ProductId, Vec<IngredientRequirement>>,
}

impl Catalog {
    /// Builds a catalog from already-parsed tables.
    ///
    /// # Errors
    /// [`CatalogError::EmptyProducts`] or [`CatalogError::EmptyRecipes`] when a
    /// table has no entries.
    pub fn new(
        products: HashMap<ProductId, Product>,
        recipes: HashMap<ProductId, Vec<IngredientRequirement>>,
    ) -> Result<Self, CatalogError> {
        if products.is_empty() {
            return Err(CatalogError::EmptyProducts);
        }
        if recipes.is_empty() {
            return Err(CatalogError::EmptyRecipes);
        }
        Ok(Self { products, recipes })
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.products.contains_key(id)
    }

    /// The recipe for `id`. A product without a recipe yields an empty slice.
    pub fn recipe(&self, id: &ProductId) -> &[IngredientRequirement] {
        self.recipes.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    pub fn recipe_count(&self) -> usize {
        self.recipes.len()
    }
}

/// Anything that can hand the pipeline a ready [`Catalog`].
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn load(&self) -> Result<Catalog, CatalogError>;
}
