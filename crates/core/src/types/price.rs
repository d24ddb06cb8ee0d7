//! Rupiah prices.
//!
//! The shop sells in Indonesian rupiah, which has no minor unit in practice,
//! so prices are whole numbers. Display follows the `id-ID` currency format
//! with zero fractional digits: `Rp`, a no-break space, then the amount with
//! `.` as the thousands separator.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Quantity;

/// Separator between the currency symbol and the amount (U+00A0).
pub const CURRENCY_SPACE: char = '\u{a0}';

/// A non-negative price in whole rupiah.
///
/// ```rust
/// # use ether_craft_core::Price;
/// assert_eq!(Price::new(45_000).display(), "Rp\u{a0}45.000");
/// assert_eq!(Price::new(1_250_000).display(), "Rp\u{a0}1.250.000");
/// assert_eq!(Price::new(0).display(), "Rp\u{a0}0");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Create a price from a whole-rupiah amount.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// The whole-rupiah amount.
    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0
    }

    /// Price of `quantity` units. Saturates instead of overflowing.
    #[must_use]
    pub fn times(self, quantity: Quantity) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity.get())))
    }

    /// Format for display, e.g. `Rp 45.000`.
    #[must_use]
    pub fn display(self) -> String {
        format!("Rp{CURRENCY_SPACE}{}", group_thousands(self.0))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

/// Insert `.` between every group of three digits, counting from the right.
fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}
