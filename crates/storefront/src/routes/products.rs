//! Catalog route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use ether_craft_core::{Action, Category, CategoryFilter, CatalogStore, FilterState, SortKey};
use serde::Deserialize;
use tracing::instrument;

use super::{NavPage, load_store};
use crate::error::Result;
use crate::filters;
use crate::render::{GridPage, RenderedGrid, render_grid};
use crate::state::AppState;
use crate::supabase::ProductQuery;

/// Catalog selector query parameters.
///
/// Unknown or missing values fall back to all categories and newest first.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub sort: Option<String>,
}

impl CatalogQuery {
    fn actions(&self) -> [Action; 2] {
        [
            Action::FragmentChanged(self.category.clone().unwrap_or_default()),
            Action::ChangeSort(SortKey::parse_lenient(self.sort.as_deref().unwrap_or_default())),
        ]
    }
}

/// Category filter button.
#[derive(Debug, Clone)]
pub struct FilterButton {
    pub value: &'static str,
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

/// Sort selector option.
#[derive(Debug, Clone)]
pub struct SortOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub nav: NavPage,
    pub grid: RenderedGrid,
    pub category_filters: Vec<FilterButton>,
    /// Current category, carried through sort changes.
    pub category: &'static str,
    pub sort_options: Vec<SortOption>,
}

/// Catalog grid fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate {
    pub grid: RenderedGrid,
}

fn filter_buttons(filter: FilterState) -> Vec<FilterButton> {
    std::iter::once(CategoryFilter::All)
        .chain(Category::ALL.into_iter().map(CategoryFilter::Only))
        .map(|category| FilterButton {
            value: category.as_str(),
            label: match category {
                CategoryFilter::All => "All",
                CategoryFilter::Only(c) => c.label(),
            },
            href: format!(
                "/products?category={}&sort={}",
                category.as_str(),
                filter.sort.as_str()
            ),
            active: category == filter.category,
        })
        .collect()
}

fn sort_options(current: SortKey) -> Vec<SortOption> {
    SortKey::ALL
        .into_iter()
        .map(|sort| SortOption {
            value: sort.as_str(),
            label: sort.label(),
            selected: sort == current,
        })
        .collect()
}

async fn catalog_store(state: &AppState, query: &CatalogQuery) -> CatalogStore {
    let mut store = load_store(state, ProductQuery::NewestFirst).await;
    for action in query.actions() {
        store.dispatch(action);
    }
    store
}

/// Display the catalog page.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<ProductsIndexTemplate> {
    let store = catalog_store(&state, &query).await;
    let filter = store.filter();
    let grid = render_grid(&store.view(), GridPage::Catalog)?;

    Ok(ProductsIndexTemplate {
        nav: NavPage::Products,
        grid,
        category_filters: filter_buttons(filter),
        category: filter.category.as_str(),
        sort_options: sort_options(filter.sort),
    })
}

/// Display the catalog grid fragment.
#[instrument(skip(state))]
pub async fn grid(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<ProductGridTemplate> {
    let store = catalog_store(&state, &query).await;
    let grid = render_grid(&store.view(), GridPage::Catalog)?;
    Ok(ProductGridTemplate { grid })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_buttons_keep_sort() {
        let buttons = filter_buttons(FilterState {
            category: CategoryFilter::Only(Category::Switches),
            sort: SortKey::PriceHigh,
        });

        assert_eq!(buttons.len(), 5);
        assert_eq!(buttons[0].value, "all");
        assert_eq!(buttons[0].href, "/products?category=all&sort=price-high");
        let active: Vec<_> = buttons.iter().filter(|b| b.active).map(|b| b.value).collect();
        assert_eq!(active, vec!["switches"]);
    }

    #[test]
    fn test_sort_options_mark_current() {
        let options = sort_options(SortKey::Name);
        let selected: Vec<_> = options.iter().filter(|o| o.selected).map(|o| o.value).collect();
        assert_eq!(selected, vec!["name"]);
    }

    #[test]
    fn test_query_defaults() {
        let [category, sort] = CatalogQuery::default().actions();
        assert_eq!(category, Action::FragmentChanged(String::new()));
        assert_eq!(sort, Action::ChangeSort(SortKey::Newest));
    }
}
