//! Fixed in-memory product source.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use ether_craft_core::Product;
use thiserror::Error;

use super::{ProductQuery, ProductSource, SupabaseError};

/// Errors loading a product fixture file.
#[derive(Debug, Error)]
pub enum StaticProductsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Serves a fixed list of products, ordered the way the data store would.
#[derive(Debug, Clone, Default)]
pub struct StaticProducts {
    products: Arc<[Product]>,
}

impl StaticProducts {
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: products.into(),
        }
    }

    /// Load a JSON array of product rows, in the table's column format.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid array
    /// of product rows.
    pub fn from_file(path: &Path) -> Result<Self, StaticProductsError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| StaticProductsError::Io {
            path: display.clone(),
            source,
        })?;
        let products: Vec<Product> =
            serde_json::from_str(&content).map_err(|source| StaticProductsError::Parse {
                path: display,
                source,
            })?;
        Ok(Self::new(products))
    }
}

#[async_trait]
impl ProductSource for StaticProducts {
    async fn fetch_all_products(&self, query: ProductQuery) -> Result<Vec<Product>, SupabaseError> {
        let mut products = self.products.to_vec();
        if query == ProductQuery::NewestFirst {
            products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }
        Ok(products)
    }
}
