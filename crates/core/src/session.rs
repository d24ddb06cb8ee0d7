//! Page session state and the action dispatch table.
//!
//! A page session owns the loaded collection, the current selector, and an
//! optional open order. Interface events are expressed as [`Action`]s and
//! applied by the pure [`reduce`] function; [`CatalogStore`] is the thin
//! stateful wrapper used at the edges.

use crate::catalog::{ProductCollection, curate, select_and_order};
use crate::order::{ContactDetails, OrderDraft};
use crate::types::{CategoryFilter, Product, ProductId, SortKey};

/// Current category selector and sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub sort: SortKey,
}

/// Whether the product collection has arrived.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded(ProductCollection),
    Failed,
}

/// Explicit state of one page session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogState {
    pub products: LoadState,
    pub filter: FilterState,
    pub order: Option<OrderDraft>,
}

/// Interface events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The product fetch succeeded.
    ProductsLoaded(Vec<Product>),
    /// The product fetch failed.
    LoadFailed,
    /// A category filter button was pressed.
    SelectCategory(CategoryFilter),
    /// The category fragment or query value changed.
    FragmentChanged(String),
    /// The sort selector changed.
    ChangeSort(SortKey),
    /// An order button was pressed.
    OpenOrder(ProductId),
    /// The quantity field changed.
    UpdateQuantity(String),
    /// The order modal was dismissed.
    CloseOrder,
    /// The order form was submitted.
    SubmitOrder(ContactDetails),
}

/// Side effect requested by a reduction, performed by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Hand the formatted order message off to the shop's chat.
    Handoff(String),
    /// An order was requested for a product that is not in the collection.
    UnknownProduct(ProductId),
}

/// What the product grid should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogView {
    Loading,
    Failed,
    /// Products loaded but none pass the selector.
    Empty,
    Products(Vec<Product>),
}

impl CatalogView {
    fn from_products(products: Vec<Product>) -> Self {
        if products.is_empty() {
            Self::Empty
        } else {
            Self::Products(products)
        }
    }
}

/// Apply `action` to `state`.
///
/// The collection is only ever replaced wholesale. Order actions are ignored
/// while no order is open, matching a closed modal.
#[must_use]
pub fn reduce(state: CatalogState, action: Action) -> (CatalogState, Effect) {
    match action {
        Action::ProductsLoaded(products) => (
            CatalogState {
                products: LoadState::Loaded(ProductCollection::new(products)),
                ..state
            },
            Effect::None,
        ),
        Action::LoadFailed => (
            CatalogState {
                products: LoadState::Failed,
                ..state
            },
            Effect::None,
        ),
        Action::SelectCategory(category) => (
            CatalogState {
                filter: FilterState {
                    category,
                    ..state.filter
                },
                ..state
            },
            Effect::None,
        ),
        Action::FragmentChanged(fragment) => reduce(
            state,
            Action::SelectCategory(CategoryFilter::from_fragment(&fragment)),
        ),
        Action::ChangeSort(sort) => (
            CatalogState {
                filter: FilterState {
                    sort,
                    ..state.filter
                },
                ..state
            },
            Effect::None,
        ),
        Action::OpenOrder(id) => {
            let product = match &state.products {
                LoadState::Loaded(collection) => collection.find(&id).cloned(),
                LoadState::Loading | LoadState::Failed => None,
            };
            match product {
                Some(product) => (
                    CatalogState {
                        order: Some(OrderDraft::new(product)),
                        ..state
                    },
                    Effect::None,
                ),
                None => (state, Effect::UnknownProduct(id)),
            }
        }
        Action::UpdateQuantity(input) => {
            let order = state
                .order
                .map(|draft| draft.with_quantity_input(&input));
            (CatalogState { order, ..state }, Effect::None)
        }
        Action::CloseOrder => (
            CatalogState {
                order: None,
                ..state
            },
            Effect::None,
        ),
        Action::SubmitOrder(contact) => match state.order {
            Some(draft) => {
                let message = draft.message(&contact);
                (
                    CatalogState {
                        order: None,
                        ..state
                    },
                    Effect::Handoff(message),
                )
            }
            None => (state, Effect::None),
        },
    }
}

/// Derive the catalog grid from `state`.
#[must_use]
pub fn catalog_view(state: &CatalogState) -> CatalogView {
    match &state.products {
        LoadState::Loading => CatalogView::Loading,
        LoadState::Failed => CatalogView::Failed,
        LoadState::Loaded(collection) => CatalogView::from_products(select_and_order(
            collection.as_slice(),
            state.filter.category,
            state.filter.sort,
        )),
    }
}

/// Derive the home page grid from `state`.
#[must_use]
pub fn curated_view(state: &CatalogState) -> CatalogView {
    match &state.products {
        LoadState::Loading => CatalogView::Loading,
        LoadState::Failed => CatalogView::Failed,
        LoadState::Loaded(collection) => {
            CatalogView::from_products(curate(collection.as_slice()))
        }
    }
}

/// Stateful wrapper owning one page session.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    state: CatalogState,
}

impl CatalogStore {
    /// Start an empty session, waiting for products.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an action and return the requested effect.
    pub fn dispatch(&mut self, action: Action) -> Effect {
        let (state, effect) = reduce(std::mem::take(&mut self.state), action);
        self.state = state;
        effect
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Current selector.
    #[must_use]
    pub const fn filter(&self) -> FilterState {
        self.state.filter
    }

    /// Open order, if any.
    #[must_use]
    pub const fn order(&self) -> Option<&OrderDraft> {
        self.state.order.as_ref()
    }

    /// Filtered and sorted catalog grid.
    #[must_use]
    pub fn view(&self) -> CatalogView {
        catalog_view(&self.state)
    }

    /// Curated home page grid.
    #[must_use]
    pub fn curated(&self) -> CatalogView {
        curated_view(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::types::{Category, Price};

    fn product(id: &str, category: Category, price: u64) -> Product {
        Product {
            id: ProductId::from(id),
            name: format!("Product {id}"),
            description: String::new(),
            category,
            price: Price::new(price),
            stock: 3,
            image_url: String::new(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
        }
    }

    fn loaded_store() -> CatalogStore {
        let mut store = CatalogStore::new();
        store.dispatch(Action::ProductsLoaded(vec![
            product("a", Category::Keycaps, 500_000),
            product("b", Category::Switches, 8_000),
            product("c", Category::Keycaps, 300_000),
        ]));
        store
    }

    #[test]
    fn test_view_before_and_after_load() {
        let mut store = CatalogStore::new();
        assert_eq!(store.view(), CatalogView::Loading);

        store.dispatch(Action::LoadFailed);
        assert_eq!(store.view(), CatalogView::Failed);
        assert_eq!(store.curated(), CatalogView::Failed);

        store.dispatch(Action::ProductsLoaded(Vec::new()));
        assert_eq!(store.view(), CatalogView::Empty);
    }

    #[test]
    fn test_filter_and_sort_actions() {
        let mut store = loaded_store();
        store.dispatch(Action::FragmentChanged("#keycaps".to_string()));
        store.dispatch(Action::ChangeSort(SortKey::PriceLow));

        let CatalogView::Products(products) = store.view() else {
            panic!("expected products");
        };
        let ids: Vec<_> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["c", "a"]);

        store.dispatch(Action::SelectCategory(Category::Stabilizers.into()));
        assert_eq!(store.view(), CatalogView::Empty);
        assert_eq!(store.filter().sort, SortKey::PriceLow);
    }

    #[test]
    fn test_order_flow_hands_off_message() {
        let mut store = loaded_store();
        assert_eq!(
            store.dispatch(Action::OpenOrder(ProductId::from("b"))),
            Effect::None
        );
        store.dispatch(Action::UpdateQuantity("3".to_string()));
        assert_eq!(store.order().map(OrderDraft::total), Some(Price::new(24_000)));

        let effect = store.dispatch(Action::SubmitOrder(ContactDetails {
            name: "Andi".to_string(),
            ..ContactDetails::default()
        }));
        let Effect::Handoff(message) = effect else {
            panic!("expected handoff, got {effect:?}");
        };
        assert!(message.contains("*Total Harga:* Rp\u{a0}24.000"));
        assert!(store.order().is_none());
    }

    #[test]
    fn test_unknown_product_and_closed_modal() {
        let mut store = loaded_store();
        assert_eq!(
            store.dispatch(Action::OpenOrder(ProductId::from("zzz"))),
            Effect::UnknownProduct(ProductId::from("zzz"))
        );

        assert_eq!(
            store.dispatch(Action::SubmitOrder(ContactDetails::default())),
            Effect::None
        );

        store.dispatch(Action::OpenOrder(ProductId::from("a")));
        store.dispatch(Action::CloseOrder);
        assert!(store.order().is_none());
    }

    #[test]
    fn test_reload_replaces_collection() {
        let mut store = loaded_store();
        store.dispatch(Action::ProductsLoaded(vec![product(
            "z",
            Category::Keyboards,
            1,
        )]));
        assert_eq!(
            store.curated(),
            CatalogView::Products(vec![product("z", Category::Keyboards, 1)])
        );
    }
}
