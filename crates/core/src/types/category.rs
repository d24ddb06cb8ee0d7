//! Product categories and the category selector.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a [`Category`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

/// The fixed set of product categories sold by the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Keyboards,
    Keycaps,
    Switches,
    Stabilizers,
}

impl Category {
    /// Every category, in navigation order.
    pub const ALL: [Self; 4] = [
        Self::Keyboards,
        Self::Keycaps,
        Self::Switches,
        Self::Stabilizers,
    ];

    /// Wire and URL name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyboards => "keyboards",
            Self::Keycaps => "keycaps",
            Self::Switches => "switches",
            Self::Stabilizers => "stabilizers",
        }
    }

    /// Human-readable label for filter buttons.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Keyboards => "Keyboards",
            Self::Keycaps => "Keycaps",
            Self::Switches => "Switches",
            Self::Stabilizers => "Stabilizers",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

/// Category selector: every product, or a single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Resolve a selector from a URL fragment or query value.
    ///
    /// A leading `#` is ignored. Empty, `all`, and unrecognized values all
    /// resolve to [`CategoryFilter::All`].
    #[must_use]
    pub fn from_fragment(fragment: &str) -> Self {
        let value = fragment.strip_prefix('#').unwrap_or(fragment);
        value.parse::<Category>().map_or(Self::All, Self::Only)
    }

    /// Wire name of the selector (`all` or the category name).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(category) => category.as_str(),
        }
    }

    /// Whether `category` passes this selector.
    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == category,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        Self::Only(category)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
