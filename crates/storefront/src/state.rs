//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::{CatalogSourceConfig, StorefrontConfig};
use crate::supabase::{ProductSource, StaticProducts, StaticProductsError, SupabaseClient};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// product source and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    products: Arc<dyn ProductSource>,
}

impl AppState {
    /// Create application state with an explicit product source.
    #[must_use]
    pub fn new(config: StorefrontConfig, products: Arc<dyn ProductSource>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, products }),
        }
    }

    /// Create application state with the product source named in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured product fixture cannot be loaded.
    pub fn from_config(config: StorefrontConfig) -> Result<Self, StaticProductsError> {
        let products: Arc<dyn ProductSource> = match &config.catalog {
            CatalogSourceConfig::Supabase(supabase) => Arc::new(SupabaseClient::new(supabase)),
            CatalogSourceConfig::File(path) => Arc::new(StaticProducts::from_file(path)?),
        };
        Ok(Self::new(config, products))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get the product source.
    #[must_use]
    pub fn products(&self) -> &dyn ProductSource {
        self.inner.products.as_ref()
    }

    /// Order recipient for WhatsApp links.
    #[must_use]
    pub fn whatsapp_number(&self) -> &str {
        &self.inner.config.whatsapp_number
    }
}
