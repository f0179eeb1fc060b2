//! Static page handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use crate::filters;
use crate::state::AppState;
use crate::views::HeaderView;

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate {
    pub header: HeaderView,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/contact.html")]
pub struct ContactTemplate {
    pub header: HeaderView,
    pub email: Option<String>,
}

/// Display the about page.
pub async fn about(State(state): State<AppState>) -> AboutTemplate {
    AboutTemplate {
        header: HeaderView::page(&state, "/a-propos"),
    }
}

/// Display the contact page.
pub async fn contact(State(state): State<AppState>) -> ContactTemplate {
    ContactTemplate {
        header: HeaderView::page(&state, "/contact"),
        email: state
            .config()
            .contact_email
            .as_ref()
            .map(|email| email.as_str().to_owned()),
    }
}
