//! JSON-file backed [`CatalogProvider`].

use super::{Catalog, CatalogError, CatalogProvider};
use crate::model::{IngredientRequirement, Product, ProductId};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Loads the catalog from a products file and a recipes file.
///
/// ```text
/// products.json  { "P001": { "name": "Margherita", "price": 28.00 } }
/// recipes.json   { "P001": [ { "ingredient": "Mozzarella", "amount": 1.10 } ] }
/// ```
///
/// Prices and amounts may be JSON numbers or strings. Numbers are read from
/// their literal text, so `28.00` keeps its two decimal places.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    products_path: PathBuf,
    recipes_path: PathBuf,
}

impl JsonCatalog {
    pub fn new(products_path: impl Into<PathBuf>, recipes_path: impl Into<PathBuf>) -> Self {
        Self {
            products_path: products_path.into(),
            recipes_path: recipes_path.into(),
        }
    }
}

#[async_trait]
impl CatalogProvider for JsonCatalog {
    #[instrument(skip(self), fields(products = %self.products_path.display(), recipes = %self.recipes_path.display()))]
    async fn load(&self) -> Result<Catalog, CatalogError> {
        let products: HashMap<ProductId, Product> = read_json(&self.products_path).await?;
        let recipes: HashMap<ProductId, Vec<IngredientRequirement>> =
            read_json(&self.recipes_path).await?;

        let catalog = Catalog::new(products, recipes)?;
        info!(
            products = catalog.product_count(),
            recipes = catalog.recipe_count(),
            "Catalog loaded"
        );
        Ok(catalog)
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    debug!(path = %path.display(), "Reading catalog file");
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&text).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
