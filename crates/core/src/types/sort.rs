//! Catalog sort keys.

use core::fmt;

/// Ordering applied to the catalog grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Most recently created first.
    #[default]
    Newest,
    /// Cheapest first.
    PriceLow,
    /// Most expensive first.
    PriceHigh,
    /// Alphabetical by product name.
    Name,
}

impl SortKey {
    /// Every sort key, in the order the sort selector lists them.
    pub const ALL: [Self; 4] = [Self::Newest, Self::PriceLow, Self::PriceHigh, Self::Name];

    /// Wire name used by the sort selector.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Name => "name",
        }
    }

    /// Label shown in the sort selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest",
            Self::PriceLow => "Price: Low to High",
            Self::PriceHigh => "Price: High to Low",
            Self::Name => "Name",
        }
    }

    /// Parse a selector value. Unknown values sort by newest.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == value)
            .unwrap_or_default()
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
