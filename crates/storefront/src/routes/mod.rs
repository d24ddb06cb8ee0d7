//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (curated selection)
//! GET  /about                  - About page
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /products               - Catalog (?category=&sort=)
//! GET  /products/grid          - Catalog grid fragment
//!
//! # Ordering
//! GET  /order/{id}             - Order form (?quantity=)
//! GET  /order/{id}/total       - Order total fragment (?quantity=)
//! POST /order/{id}             - Submit order, redirect to WhatsApp
//! ```
//!
//! Every page load reads the product source exactly once.

pub mod about;
pub mod home;
pub mod order;
pub mod products;

use axum::{Router, routing::get};
use ether_craft_core::{Action, CatalogStore};

use crate::state::AppState;
use crate::supabase::ProductQuery;

/// Which navigation link is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPage {
    Home,
    Products,
    About,
}

impl NavPage {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Products => "products",
            Self::About => "about",
        }
    }

    /// CSS class for the nav link named `page`.
    #[must_use]
    pub fn class_for(self, page: &str) -> &'static str {
        if self.as_str() == page {
            "nav-link active"
        } else {
            "nav-link"
        }
    }
}

/// Start a page session and feed it the product read.
///
/// A failed read is logged and recorded in the session; pages decide how to
/// show it.
pub async fn load_store(state: &AppState, query: ProductQuery) -> CatalogStore {
    let mut store = CatalogStore::new();
    let action = match state.products().fetch_all_products(query).await {
        Ok(products) => {
            tracing::debug!(count = products.len(), "Loaded products");
            Action::ProductsLoaded(products)
        }
        Err(e) => {
            tracing::error!(error = %e, "Error loading products");
            Action::LoadFailed
        }
    };
    store.dispatch(action);
    store
}

/// Create the catalog routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/grid", get(products::grid))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(order::show).post(order::submit))
        .route("/{id}/total", get(order::total))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/about", get(about::about))
        .nest("/products", product_routes())
        .nest("/order", order_routes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_class_marks_current_page() {
        assert_eq!(NavPage::Products.class_for("products"), "nav-link active");
        assert_eq!(NavPage::Products.class_for("home"), "nav-link");
        assert_eq!(NavPage::About.class_for("about"), "nav-link active");
    }
}
