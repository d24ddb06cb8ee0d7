//! About page route handler.

use askama::Template;
use askama_web::WebTemplate;

use super::NavPage;
use crate::filters;

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub nav: NavPage,
}

/// Display the about page.
pub async fn about() -> AboutTemplate {
    AboutTemplate {
        nav: NavPage::About,
    }
}
