//! Integration test support for Ether Craft.
//!
//! Drives the storefront router in-process with `tower::ServiceExt::oneshot`,
//! backed by a fixed product list or a product source that always fails.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p ether-craft-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use chrono::{DateTime, TimeZone, Utc};
use ether_craft_core::{Category, Price, Product, ProductId};
use ether_craft_storefront::config::{CatalogSourceConfig, DEFAULT_WHATSAPP_NUMBER, StorefrontConfig};
use ether_craft_storefront::state::AppState;
use ether_craft_storefront::supabase::{
    PostgrestError, ProductQuery, ProductSource, StaticProducts, SupabaseError,
};
use tower::ServiceExt;

/// Largest response body the helpers will buffer.
const BODY_LIMIT: usize = 1024 * 1024;

fn day(n: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, n, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

fn product(id: &str, name: &str, category: Category, price: u64, stock: u32, created: u32) -> Product {
    Product {
        id: ProductId::from(id),
        name: name.to_string(),
        description: format!("{name} from the Ether Craft catalog"),
        category,
        price: Price::new(price),
        stock,
        image_url: format!("/static/products/{id}.jpg"),
        created_at: day(created),
    }
}

/// Catalog used by the tests, in table order.
///
/// `kb-2` is out of stock. There are more keyboards, keycaps and switches
/// than the home page shows.
#[must_use]
pub fn sample_products() -> Vec<Product> {
    vec![
        product("kb-1", "Aurora 65", Category::Keyboards, 2_450_000, 5, 1),
        product("kb-2", "Borealis TKL", Category::Keyboards, 3_100_000, 0, 5),
        product("kc-1", "GMK Olivia", Category::Keycaps, 1_650_000, 3, 2),
        product("sw-1", "Gateron Oil King", Category::Switches, 45_000, 100, 4),
        product("kb-3", "Cirrus 75", Category::Keyboards, 1_800_000, 2, 9),
        product("kc-2", "PBT Milk", Category::Keycaps, 450_000, 10, 7),
        product("st-1", "Durock V2", Category::Stabilizers, 250_000, 20, 6),
        product("kc-3", "MT3 Cyber", Category::Keycaps, 1_200_000, 1, 3),
        product("sw-2", "Cherry MX Black", Category::Switches, 35_000, 50, 8),
    ]
}

/// Product source whose reads always fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingProducts;

#[async_trait]
impl ProductSource for FailingProducts {
    async fn fetch_all_products(&self, _query: ProductQuery) -> Result<Vec<Product>, SupabaseError> {
        Err(SupabaseError::Api {
            status: 503,
            error: PostgrestError {
                message: "service unavailable".to_string(),
                ..PostgrestError::default()
            },
        })
    }
}

/// Storefront configuration for tests.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: [127, 0, 0, 1].into(),
        port: 0,
        catalog: CatalogSourceConfig::File(PathBuf::from("products.json")),
        whatsapp_number: DEFAULT_WHATSAPP_NUMBER.to_string(),
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// Storefront router backed by `source`.
#[must_use]
pub fn test_app(source: impl ProductSource + 'static) -> Router {
    ether_craft_storefront::app(AppState::new(test_config(), Arc::new(source)))
}

/// Storefront router backed by [`sample_products`].
#[must_use]
pub fn sample_app() -> Router {
    test_app(StaticProducts::new(sample_products()))
}

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header, if present.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    /// Byte offset of a product card in the body.
    #[must_use]
    pub fn card_position(&self, id: &str) -> Option<usize> {
        self.body.find(&format!("data-product-id=\"{id}\""))
    }
}

/// Send `request` through `app` and buffer the response.
///
/// # Panics
///
/// Panics if the router fails or the body is not UTF-8.
pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap_or_else(|e| match e {});
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), BODY_LIMIT)
        .await
        .expect("Failed to read response body");
    let body = String::from_utf8(bytes.to_vec()).expect("Response body is not UTF-8");
    TestResponse {
        status,
        headers,
        body,
    }
}

/// `GET uri`.
///
/// # Panics
///
/// Panics if `uri` is not a valid request target.
pub async fn get(app: Router, uri: &str) -> TestResponse {
    let request = Request::get(uri)
        .body(Body::empty())
        .expect("Failed to build request");
    send(app, request).await
}

/// `POST uri` with a URL-encoded form body.
///
/// # Panics
///
/// Panics if `uri` is not a valid request target.
pub async fn post_form(app: Router, uri: &str, form: &str) -> TestResponse {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .expect("Failed to build request");
    send(app, request).await
}
