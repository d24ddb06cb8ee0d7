//! Order quantities.

use core::fmt;
use core::num::NonZeroU32;

/// A positive order quantity.
///
/// Quantities arrive as free text from the order form, so construction is
/// lenient: [`Quantity::coerce`] never fails and falls back to one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity from a non-zero count.
    #[must_use]
    pub const fn new(count: NonZeroU32) -> Self {
        Self(count)
    }

    /// The number of units.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Coerce form input into a quantity.
    ///
    /// Leading whitespace and an optional sign are accepted, followed by the
    /// leading run of ASCII digits; anything after the digits is ignored.
    /// Input with no digits, zero, or a negative value yields one unit.
    /// Values beyond `u32::MAX` saturate.
    ///
    /// ```rust
    /// # use ether_craft_core::Quantity;
    /// assert_eq!(Quantity::coerce("3").get(), 3);
    /// assert_eq!(Quantity::coerce(" 12 pcs").get(), 12);
    /// assert_eq!(Quantity::coerce("abc").get(), 1);
    /// assert_eq!(Quantity::coerce("0").get(), 1);
    /// assert_eq!(Quantity::coerce("-4").get(), 1);
    /// ```
    #[must_use]
    pub fn coerce(input: &str) -> Self {
        let trimmed = input.trim_start();
        let (negative, rest) = trimmed.strip_prefix('-').map_or_else(
            || (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
            |rest| (true, rest),
        );
        let digits = rest
            .split(|c: char| !c.is_ascii_digit())
            .next()
            .unwrap_or_default();

        if negative || digits.is_empty() {
            return Self::ONE;
        }

        let count = digits.bytes().fold(0u32, |acc, b| {
            acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
        });

        NonZeroU32::new(count).map_or(Self::ONE, Self)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
