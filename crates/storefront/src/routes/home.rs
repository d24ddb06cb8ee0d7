//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use ether_craft_core::GENERAL_INQUIRY_MESSAGE;
use tracing::instrument;

use super::{NavPage, load_store};
use crate::error::Result;
use crate::filters;
use crate::handoff::whatsapp_url;
use crate::render::{GridPage, RenderedGrid, render_grid};
use crate::state::AppState;
use crate::supabase::ProductQuery;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nav: NavPage,
    /// Curated featured products.
    pub grid: RenderedGrid,
    /// Chat link for the custom build service.
    pub custom_build_url: String,
}

/// Display the home page.
///
/// Shows two keyboards, two keycap sets, one switch and one stabilizer,
/// picked in the order the product source returns them.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<HomeTemplate> {
    let store = load_store(&state, ProductQuery::Unordered).await;
    let grid = render_grid(&store.curated(), GridPage::Home)?;

    Ok(HomeTemplate {
        nav: NavPage::Home,
        grid,
        custom_build_url: whatsapp_url(state.whatsapp_number(), GENERAL_INQUIRY_MESSAGE),
    })
}
