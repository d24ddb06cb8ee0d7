//! Order route handlers.
//!
//! The order form stands in for a modal: it shows the product, keeps a
//! running total as the quantity changes, and on submit hands the formatted
//! order off to WhatsApp.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::{HeaderMap, header::REFERER},
    response::Redirect,
};
use ether_craft_core::{Action, CatalogStore, ContactDetails, Effect, OrderDraft, ProductId};
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use super::NavPage;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::handoff::whatsapp_url;
use crate::render::order_path;
use crate::state::AppState;
use crate::supabase::ProductQuery;

/// Where closing the order form returns to when the origin is unknown.
const DEFAULT_BACK_PATH: &str = "/products";

/// Pages an order form can be opened from.
const ORDER_ORIGINS: [&str; 2] = ["/", "/products"];

/// Page the order form was opened from, taken from the `Referer` header.
///
/// Only the path and query of a known product page are kept, so the link
/// always stays on this site and keeps the catalog selector.
fn back_path(headers: &HeaderMap) -> String {
    headers
        .get(REFERER)
        .and_then(|value| value.to_str().ok())
        .and_then(|referer| Url::parse(referer).ok())
        .filter(|url| ORDER_ORIGINS.contains(&url.path()))
        .map_or_else(
            || DEFAULT_BACK_PATH.to_string(),
            |url| match url.query() {
                Some(query) => format!("{}?{query}", url.path()),
                None => url.path().to_string(),
            },
        )
}

/// Quantity query parameter, as typed.
#[derive(Debug, Default, Deserialize)]
pub struct QuantityQuery {
    pub quantity: Option<String>,
}

/// Submitted order form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OrderForm {
    pub quantity: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub notes: String,
}

impl OrderForm {
    fn into_parts(self) -> (String, ContactDetails) {
        (
            self.quantity,
            ContactDetails {
                name: self.name,
                email: self.email,
                phone: self.phone,
                address: self.address,
                notes: self.notes,
            },
        )
    }
}

/// Order display data for templates.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub name: String,
    pub unit_price: String,
    pub order_path: String,
    pub quantity: u32,
}

impl From<&OrderDraft> for OrderView {
    fn from(draft: &OrderDraft) -> Self {
        Self {
            name: draft.product.name.clone(),
            unit_price: draft.product.price.display(),
            order_path: order_path(&draft.product),
            quantity: draft.quantity.get(),
        }
    }
}

/// Order form page template.
#[derive(Template, WebTemplate)]
#[template(path = "order/show.html")]
pub struct OrderTemplate {
    pub nav: NavPage,
    pub order: OrderView,
    pub total: String,
    pub back_path: String,
}

/// Order total fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/order_total.html")]
pub struct OrderTotalTemplate {
    pub total: String,
}

/// Load products and open an order for `id`.
///
/// Unlike the catalog pages, a failed read is an error here: there is no
/// product to order.
async fn open_order(state: &AppState, id: String, quantity: Option<&str>) -> Result<CatalogStore> {
    let products = state
        .products()
        .fetch_all_products(ProductQuery::Unordered)
        .await?;

    let mut store = CatalogStore::new();
    store.dispatch(Action::ProductsLoaded(products));
    if let Effect::UnknownProduct(id) = store.dispatch(Action::OpenOrder(ProductId::new(id))) {
        return Err(AppError::NotFound(format!("product {id}")));
    }
    if let Some(quantity) = quantity {
        store.dispatch(Action::UpdateQuantity(quantity.to_string()));
    }

    match store.order() {
        Some(draft) if draft.product.in_stock() => Ok(store),
        Some(draft) => Err(AppError::BadRequest(format!(
            "{} is out of stock",
            draft.product.name
        ))),
        None => Err(AppError::Internal("order was not opened".to_string())),
    }
}

fn current_order(store: &CatalogStore) -> Result<&OrderDraft> {
    store
        .order()
        .ok_or_else(|| AppError::Internal("order was not opened".to_string()))
}

/// Display the order form.
#[instrument(skip(state, headers))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<QuantityQuery>,
    headers: HeaderMap,
) -> Result<OrderTemplate> {
    let store = open_order(&state, id, query.quantity.as_deref()).await?;
    let draft = current_order(&store)?;

    add_breadcrumb(
        "order",
        "Opened order form",
        Some(&[("product_id", draft.product.id.as_str())]),
    );

    Ok(OrderTemplate {
        nav: NavPage::Products,
        order: OrderView::from(draft),
        total: draft.total().display(),
        back_path: back_path(&headers),
    })
}

/// Display the order total for a quantity.
///
/// Non-numeric or non-positive quantities count as one.
#[instrument(skip(state))]
pub async fn total(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<QuantityQuery>,
) -> Result<OrderTotalTemplate> {
    let store = open_order(&state, id, query.quantity.as_deref()).await?;
    let draft = current_order(&store)?;

    Ok(OrderTotalTemplate {
        total: draft.total().display(),
    })
}

/// Submit an order and redirect to the shop's WhatsApp chat.
#[instrument(skip(state, form))]
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<OrderForm>,
) -> Result<Redirect> {
    let (quantity, contact) = form.into_parts();
    let mut store = open_order(&state, id, Some(&quantity)).await?;
    let draft = current_order(&store)?;
    let product_id = draft.product.id.clone();
    let quantity = draft.quantity;

    match store.dispatch(Action::SubmitOrder(contact)) {
        Effect::Handoff(message) => {
            tracing::info!(product_id = %product_id, quantity = %quantity, "Order handed off");
            add_breadcrumb(
                "order",
                "Submitted order",
                Some(&[("product_id", product_id.as_str())]),
            );
            Ok(Redirect::to(&whatsapp_url(state.whatsapp_number(), &message)))
        }
        Effect::UnknownProduct(id) => Err(AppError::NotFound(format!("product {id}"))),
        Effect::None => Err(AppError::Internal("order was not submitted".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn referer(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, value.parse().unwrap());
        headers
    }

    #[test]
    fn test_back_path_returns_to_origin_page() {
        assert_eq!(back_path(&referer("http://localhost:3000/")), "/");
        assert_eq!(
            back_path(&referer("https://ethercraft.id/products?category=keycaps&sort=name")),
            "/products?category=keycaps&sort=name"
        );
    }

    #[test]
    fn test_back_path_falls_back_to_catalog() {
        assert_eq!(back_path(&HeaderMap::new()), "/products");
        assert_eq!(back_path(&referer("https://elsewhere.example/login")), "/products");
        assert_eq!(back_path(&referer("not a url")), "/products");
    }

    #[test]
    fn test_order_form_defaults_missing_fields() {
        let form: OrderForm = serde_json::from_str(r#"{"name":"Sari","quantity":"2"}"#).unwrap();
        let (quantity, contact) = form.into_parts();
        assert_eq!(quantity, "2");
        assert_eq!(contact.name, "Sari");
        assert!(contact.notes.is_empty());
    }
}
