//! Product data source backed by a hosted Supabase project.
//!
//! # Architecture
//!
//! - Reads the `products` table through Supabase's PostgREST endpoint
//! - Supabase is the source of truth - one read per page load, no local copy
//! - No retries and no caching: a failed read is surfaced to the page as-is
//!
//! Handlers depend on the [`ProductSource`] trait rather than the HTTP client
//! so pages can be served from a JSON fixture ([`StaticProducts`]) in tests
//! and offline previews.
//!
//! # Example
//!
//! ```rust,ignore
//! use ether_craft_storefront::supabase::{ProductQuery, ProductSource, SupabaseClient};
//!
//! let client = SupabaseClient::new(&supabase_config);
//! let products = client.fetch_all_products(ProductQuery::NewestFirst).await?;
//! ```

mod client;
mod fixture;

pub use client::SupabaseClient;
pub use fixture::{StaticProducts, StaticProductsError};

use async_trait::async_trait;
use ether_craft_core::Product;
use serde::Deserialize;
use thiserror::Error;

/// Row ordering requested from the data store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductQuery {
    /// Table order, as the home page reads it.
    Unordered,
    /// Descending `created_at`, as the catalog page reads it.
    NewestFirst,
}

/// Read-only access to the product table.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch every product row.
    async fn fetch_all_products(&self, query: ProductQuery) -> Result<Vec<Product>, SupabaseError>;
}

/// Errors that can occur when reading products.
#[derive(Debug, Error)]
pub enum SupabaseError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// PostgREST rejected the query.
    #[error("Supabase returned {status}: {}", format_api_error(.error))]
    Api {
        status: u16,
        error: PostgrestError,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Error body returned by PostgREST.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostgrestError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl PostgrestError {
    /// Parse an error body, falling back to the raw text as the message.
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_else(|_| Self {
            message: body.chars().take(200).collect(),
            ..Self::default()
        })
    }
}

fn format_api_error(error: &PostgrestError) -> String {
    let mut parts = Vec::new();

    if let Some(code) = &error.code {
        parts.push(format!("[{code}]"));
    }
    if !error.message.is_empty() {
        parts.push(error.message.clone());
    }
    if let Some(details) = &error.details {
        parts.push(format!("({details})"));
    }
    if let Some(hint) = &error.hint {
        parts.push(format!("hint: {hint}"));
    }

    if parts.is_empty() {
        "(no error details provided)".to_string()
    } else {
        parts.join(" ")
    }
}
