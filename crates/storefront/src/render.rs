//! Product card and grid rendering.
//!
//! Rendering is pure: the same product always yields byte-identical markup.

use askama::Template;
use ether_craft_core::{CatalogView, Product};

/// Shown while products are on their way.
pub const LOADING_MESSAGE: &str = "Loading products...";
/// Shown when the product read fails.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load products. Please try again later.";
/// Shown when a catalog category has no products.
pub const EMPTY_CATEGORY_MESSAGE: &str = "No products found in this category.";
/// Shown when the home page selection is empty.
pub const EMPTY_HOME_MESSAGE: &str = "No products to display.";

/// Product display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub id: String,
    /// Link opening the order modal for this product.
    pub order_path: String,
    pub name: String,
    pub description: String,
    pub category: &'static str,
    pub image_url: String,
    pub price: String,
    pub stock: u32,
    pub orderable: bool,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            order_path: order_path(product),
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category.as_str(),
            image_url: product.image_url.clone(),
            price: product.price.display(),
            stock: product.stock,
            orderable: product.in_stock(),
        }
    }
}

/// Path of the order modal for `product`.
#[must_use]
pub fn order_path(product: &Product) -> String {
    format!("/order/{}", urlencoding::encode(product.id.as_str()))
}

/// Single product card.
#[derive(Template)]
#[template(path = "partials/product_card.html")]
struct ProductCardTemplate<'a> {
    card: &'a ProductCardView,
}

/// Render one product card.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_card(product: &Product) -> askama::Result<String> {
    ProductCardTemplate {
        card: &ProductCardView::from(product),
    }
    .render()
}

/// Which page a grid is rendered for; decides the empty-state message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridPage {
    Home,
    Catalog,
}

impl GridPage {
    const fn empty_message(self) -> &'static str {
        match self {
            Self::Home => EMPTY_HOME_MESSAGE,
            Self::Catalog => EMPTY_CATEGORY_MESSAGE,
        }
    }
}

/// A rendered product grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedGrid {
    /// Product count line (e.g. `3 products`).
    pub count_text: String,
    /// Grid contents: the cards, or a placeholder.
    pub html: String,
}

/// Render the grid for `view`.
///
/// # Errors
///
/// Returns an error if a card fails to render.
pub fn render_grid(view: &CatalogView, page: GridPage) -> askama::Result<RenderedGrid> {
    let grid = match view {
        CatalogView::Loading => RenderedGrid {
            count_text: String::new(),
            html: placeholder(LOADING_MESSAGE),
        },
        CatalogView::Failed => RenderedGrid {
            count_text: String::new(),
            html: placeholder(LOAD_FAILED_MESSAGE),
        },
        CatalogView::Empty => RenderedGrid {
            count_text: product_count_text(0),
            html: placeholder(page.empty_message()),
        },
        CatalogView::Products(products) => RenderedGrid {
            count_text: product_count_text(products.len()),
            html: products
                .iter()
                .map(render_card)
                .collect::<askama::Result<Vec<_>>>()?
                .join(""),
        },
    };
    Ok(grid)
}

/// Product count line, e.g. `0 products`, `1 product`, `12 products`.
#[must_use]
pub fn product_count_text(count: usize) -> String {
    if count == 1 {
        "1 product".to_string()
    } else {
        format!("{count} products")
    }
}

fn placeholder(message: &str) -> String {
    format!(r#"<div class="loading">{message}</div>"#)
}
