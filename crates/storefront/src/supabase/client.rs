//! PostgREST client for the `products` table.

use std::sync::Arc;

use async_trait::async_trait;
use ether_craft_core::Product;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};
use url::Url;

use super::{PostgrestError, ProductQuery, ProductSource, SupabaseError};
use crate::config::SupabaseConfig;

/// Table holding the product rows.
const PRODUCTS_TABLE: &str = "products";

/// Client for a Supabase project's REST endpoint.
///
/// Cheaply cloneable; clones share one connection pool.
#[derive(Clone)]
pub struct SupabaseClient {
    inner: Arc<SupabaseClientInner>,
}

struct SupabaseClientInner {
    client: reqwest::Client,
    rest_url: Url,
    anon_key: SecretString,
}

impl SupabaseClient {
    /// Create a new client for the configured project.
    #[must_use]
    pub fn new(config: &SupabaseConfig) -> Self {
        let mut rest_url = config.url.clone();
        rest_url.set_path(&format!("/rest/v1/{PRODUCTS_TABLE}"));
        rest_url.set_query(None);

        Self {
            inner: Arc::new(SupabaseClientInner {
                client: reqwest::Client::new(),
                rest_url,
                anon_key: config.anon_key.clone(),
            }),
        }
    }

    /// URL selecting every column, with the requested ordering.
    fn products_url(&self, query: ProductQuery) -> Url {
        let mut url = self.inner.rest_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("select", "*");
            if query == ProductQuery::NewestFirst {
                pairs.append_pair("order", "created_at.desc");
            }
        }
        url
    }
}

#[async_trait]
impl ProductSource for SupabaseClient {
    #[instrument(skip(self))]
    async fn fetch_all_products(&self, query: ProductQuery) -> Result<Vec<Product>, SupabaseError> {
        let anon_key = self.inner.anon_key.expose_secret();

        let response = self
            .inner
            .client
            .get(self.products_url(query))
            .header("apikey", anon_key)
            .bearer_auth(anon_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Supabase returned non-success status"
            );
            return Err(SupabaseError::Api {
                status: status.as_u16(),
                error: PostgrestError::from_body(&body),
            });
        }

        let products = parse_products(&body)?;

        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }
}

/// Parse a PostgREST response body into product rows.
fn parse_products(body: &str) -> Result<Vec<Product>, SupabaseError> {
    serde_json::from_str(body).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %body.chars().take(500).collect::<String>(),
            "Failed to parse Supabase products response"
        );
        SupabaseError::Parse(e)
    })
}
