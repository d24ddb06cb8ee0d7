//! Product identifier.
//!
//! Supabase tables key rows by either `uuid` or `bigint` columns, so the
//! identifier is held in its textual form and compared as text. Order buttons
//! carry the same textual form back to the server.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Unique, stable identifier of a product row.
///
/// Deserializes from a JSON string or integer and always serializes as a
/// string.
///
/// # Example
///
/// ```rust
/// # use ether_craft_core::ProductId;
/// let from_text: ProductId = serde_json::from_str("\"kb-01\"").unwrap();
/// let from_int: ProductId = serde_json::from_str("42").unwrap();
///
/// assert_eq!(from_text.as_str(), "kb-01");
/// assert_eq!(from_int, ProductId::new("42"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Create a new ID from its textual form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the textual form of the ID.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

/// Wire forms accepted for an ID column.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
}

impl From<RawId> for ProductId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => Self(s),
            RawId::Integer(n) => Self(n.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_and_integer_ids_compare_as_text() {
        let uuid: ProductId =
            serde_json::from_str("\"0b8e2f9c-3c47-4a0e-9d36-2f1f6c1b7a10\"").unwrap();
        assert_eq!(uuid.as_str(), "0b8e2f9c-3c47-4a0e-9d36-2f1f6c1b7a10");

        let int: ProductId = serde_json::from_str("7").unwrap();
        assert_eq!(int, ProductId::from("7"));
        assert_eq!(serde_json::to_string(&int).unwrap(), "\"7\"");
    }
}
