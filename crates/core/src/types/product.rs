//! Product records as stored in the `products` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::{Category, Price, ProductId};

/// A product row.
///
/// Field names match the table's column names so rows deserialize directly
/// from the data store's JSON. Products are immutable once loaded; the
/// remote store is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub category: Category,
    pub price: Price,
    pub stock: u32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Whether the product can currently be ordered.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Nullable text columns read as empty strings.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
