//! Catalog selection: filtering, sorting, and the home page's curated grid.
//!
//! Everything here is a pure function of the loaded collection and the
//! caller's selector, so the same inputs always produce the same grid.

use std::cmp::Ordering;
use std::sync::Arc;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::types::{Category, CategoryFilter, Product, ProductId, SortKey};

/// Per-category caps for the home page grid, in display order.
pub const CURATED_CAPS: [(Category, usize); 4] = [
    (Category::Keyboards, 2),
    (Category::Keycaps, 2),
    (Category::Switches, 1),
    (Category::Stabilizers, 1),
];

/// The products loaded for one page session.
///
/// Populated once per page load and replaced wholesale; never mutated in
/// place. Cloning is cheap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductCollection(Arc<[Product]>);

impl ProductCollection {
    /// Wrap a freshly loaded product list.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self(products.into())
    }

    /// The products in load order.
    #[must_use]
    pub fn as_slice(&self) -> &[Product] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        find(&self.0, id)
    }
}

impl From<Vec<Product>> for ProductCollection {
    fn from(products: Vec<Product>) -> Self {
        Self::new(products)
    }
}

/// Filter `products` by `category`, then order by `sort_key`.
///
/// Filtering keeps relative order. All sorts are stable, so equal keys keep
/// the filtered order:
///
/// - [`SortKey::PriceLow`]: ascending price
/// - [`SortKey::PriceHigh`]: descending price
/// - [`SortKey::Name`]: ascending name, see [`compare_names`]
/// - [`SortKey::Newest`]: descending creation time
///
/// An empty result is a valid outcome, not an error.
#[must_use]
pub fn select_and_order(
    products: &[Product],
    category: CategoryFilter,
    sort_key: SortKey,
) -> Vec<Product> {
    let mut selected: Vec<Product> = products
        .iter()
        .filter(|p| category.matches(p.category))
        .cloned()
        .collect();

    match sort_key {
        SortKey::PriceLow => selected.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceHigh => selected.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::Name => selected.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortKey::Newest => selected.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }

    selected
}

/// Pick the home page selection.
///
/// Takes the first products of each category in [`CURATED_CAPS`] order, in
/// the collection's existing order, without further sorting. Categories with
/// fewer products contribute fewer items.
#[must_use]
pub fn curate(products: &[Product]) -> Vec<Product> {
    CURATED_CAPS
        .iter()
        .flat_map(|&(category, cap)| {
            products
                .iter()
                .filter(move |p| p.category == category)
                .take(cap)
        })
        .cloned()
        .collect()
}

/// Look up a product by ID.
#[must_use]
pub fn find<'a>(products: &'a [Product], id: &ProductId) -> Option<&'a Product> {
    products.iter().find(|p| &p.id == id)
}

/// Compare product names the way a reader would alphabetize them.
///
/// Levels, each consulted only on a tie:
///
/// 1. base letters, ignoring accents and case (`Éclair` sits with `eclair`)
/// 2. accents, unaccented first
/// 3. case, lowercase first
/// 4. raw text, so the order stays total
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| accented_letters(a).cmp(accented_letters(b)))
        .then_with(|| case_pattern(a).cmp(case_pattern(b)))
        .then_with(|| a.cmp(b))
}

fn base_letters(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn accented_letters(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd().flat_map(char::to_lowercase)
}

fn case_pattern(name: &str) -> impl Iterator<Item = bool> + '_ {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    use super::*;
    use crate::types::Price;

    fn product(id: &str, name: &str, category: Category, price: u64, day: u32) -> Product {
        Product {
            id: ProductId::from(id),
            name: name.to_string(),
            description: String::new(),
            category,
            price: Price::new(price),
            stock: 5,
            image_url: String::new(),
            created_at: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
        }
    }

    fn sample() -> Vec<Product> {
        vec![
            product("1", "Aurora 65", Category::Keyboards, 2_450_000, 3),
            product("2", "GMK Botanical", Category::Keycaps, 1_650_000, 5),
            product("3", "Gateron Oil King", Category::Switches, 15_000, 1),
            product("4", "Durock V2", Category::Stabilizers, 350_000, 7),
            product("5", "zeal PC", Category::Stabilizers, 350_000, 2),
            product("6", "Bakeneko60", Category::Keyboards, 1_200_000, 9),
            product("7", "ePBT Kuro", Category::Keycaps, 900_000, 4),
            product("8", "Tecsee Ruby", Category::Switches, 9_000, 8),
            product("9", "KAT Milkshake", Category::Keycaps, 1_450_000, 6),
            product("10", "Mode Sonnet", Category::Keyboards, 8_500_000, 10),
        ]
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_filter_keeps_relative_order() {
        let out = select_and_order(&sample(), Category::Keycaps.into(), SortKey::PriceLow);
        assert_eq!(ids(&out), ["7", "9", "2"]);

        let out = select_and_order(&sample(), Category::Keyboards.into(), SortKey::Name);
        assert_eq!(ids(&out), ["1", "6", "10"]);
    }

    #[test]
    fn test_price_sorts_are_stable() {
        let out = select_and_order(
            &sample(),
            Category::Stabilizers.into(),
            SortKey::PriceHigh,
        );
        assert_eq!(ids(&out), ["4", "5"]);

        let out = select_and_order(&sample(), Category::Stabilizers.into(), SortKey::PriceLow);
        assert_eq!(ids(&out), ["4", "5"]);
    }

    #[test]
    fn test_name_sort_ignores_case() {
        let out = select_and_order(&sample(), CategoryFilter::All, SortKey::Name);
        let names: Vec<_> = out.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Aurora 65",
                "Bakeneko60",
                "Durock V2",
                "ePBT Kuro",
                "Gateron Oil King",
                "GMK Botanical",
                "KAT Milkshake",
                "Mode Sonnet",
                "Tecsee Ruby",
                "zeal PC",
            ]
        );
    }

    #[test]
    fn test_name_sort_folds_accents_and_puts_lowercase_first() {
        let products: Vec<_> = ["Zeal", "Éclair", "abc", "ABC", "eclair", "Ébène"]
            .into_iter()
            .enumerate()
            .map(|(i, name)| product(&i.to_string(), name, Category::Keycaps, 1, 1))
            .collect();

        let out = select_and_order(&products, CategoryFilter::All, SortKey::Name);
        let names: Vec<_> = out.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["abc", "ABC", "Ébène", "eclair", "Éclair", "Zeal"]);
    }

    #[test]
    fn test_compare_names_is_consistent() {
        assert_eq!(compare_names("Éclair", "Éclair"), Ordering::Equal);
        // Decomposed and precomposed accents collate together; raw text breaks the tie.
        assert_eq!(compare_names("e\u{301}clair", "\u{e9}clair"), Ordering::Less);
        assert_eq!(compare_names("abc", "ABC"), Ordering::Less);
        assert_eq!(compare_names("ABC", "abc"), Ordering::Greater);
    }

    #[test]
    fn test_newest_sorts_by_creation_descending() {
        let out = select_and_order(&sample(), CategoryFilter::All, SortKey::Newest);
        assert_eq!(ids(&out), ["10", "6", "8", "4", "9", "2", "7", "1", "5", "3"]);
    }

    #[test]
    fn test_empty_category_is_empty_not_error() {
        let only_keyboards: Vec<_> = sample()
            .into_iter()
            .filter(|p| p.category == Category::Keyboards)
            .collect();
        let out = select_and_order(&only_keyboards, Category::Switches.into(), SortKey::Newest);
        assert!(out.is_empty());
        assert!(select_and_order(&[], CategoryFilter::All, SortKey::Name).is_empty());
    }

    #[test]
    fn test_curate_takes_first_per_category_in_cap_order() {
        let out = curate(&sample());
        assert_eq!(ids(&out), ["1", "6", "2", "7", "3", "4"]);
    }

    #[test]
    fn test_curate_underpopulated_and_empty() {
        let partial = vec![
            product("k", "Solo", Category::Keyboards, 1, 1),
            product("s", "Stab", Category::Stabilizers, 1, 1),
        ];
        assert_eq!(ids(&curate(&partial)), ["k", "s"]);
        assert!(curate(&[]).is_empty());
    }

    #[test]
    fn test_collection_find() {
        let collection = ProductCollection::new(sample());
        assert_eq!(
            collection.find(&ProductId::from("8")).map(|p| p.name.as_str()),
            Some("Tecsee Ruby")
        );
        assert!(collection.find(&ProductId::from("404")).is_none());
    }

    fn arb_category() -> impl Strategy<Value = Category> {
        prop::sample::select(Category::ALL.to_vec())
    }

    fn arb_filter() -> impl Strategy<Value = CategoryFilter> {
        prop_oneof![
            Just(CategoryFilter::All),
            arb_category().prop_map(CategoryFilter::Only),
        ]
    }

    fn arb_sort() -> impl Strategy<Value = SortKey> {
        prop::sample::select(SortKey::ALL.to_vec())
    }

    fn arb_products() -> impl Strategy<Value = Vec<Product>> {
        prop::collection::vec(
            (arb_category(), 0u64..5_000_000, 1u32..28, "[A-Za-z ]{1,12}"),
            0..40,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (category, price, day, name))| {
                    product(&i.to_string(), &name, category, price, day)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_output_never_grows(
            products in arb_products(),
            filter in arb_filter(),
            sort in arb_sort(),
        ) {
            let out = select_and_order(&products, filter, sort);
            prop_assert!(out.len() <= products.len());
            if filter == CategoryFilter::All {
                prop_assert_eq!(out.len(), products.len());
            }
            prop_assert!(out.iter().all(|p| filter.matches(p.category)));
        }

        #[test]
        fn prop_idempotent(
            products in arb_products(),
            filter in arb_filter(),
            sort in arb_sort(),
        ) {
            let once = select_and_order(&products, filter, sort);
            let twice = select_and_order(&once, filter, sort);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_price_low_reversed_is_price_high(
            prices in prop::collection::btree_set(0u64..10_000_000, 0..30),
            filter in arb_filter(),
        ) {
            let products: Vec<_> = prices
                .into_iter()
                .enumerate()
                .map(|(i, price)| {
                    let category = Category::ALL[i % Category::ALL.len()];
                    product(&i.to_string(), "x", category, price, 1)
                })
                .collect();

            let mut low = select_and_order(&products, filter, SortKey::PriceLow);
            low.reverse();
            let high = select_and_order(&products, filter, SortKey::PriceHigh);
            prop_assert_eq!(low, high);
        }

        #[test]
        fn prop_curate_respects_caps(products in arb_products()) {
            let out = curate(&products);
            prop_assert!(out.len() <= 6);
            for (category, cap) in CURATED_CAPS {
                let count = out.iter().filter(|p| p.category == category).count();
                prop_assert!(count <= cap);
            }
        }
    }
}
