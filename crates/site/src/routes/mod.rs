//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Landing page
//! GET  /etudiants              - Student index
//! GET  /etudiants/{key}        - Student portfolio (slug or ID)
//! GET  /projets/{id}           - Project page
//! GET  /evenements             - Upcoming and past events
//! GET  /evenements/{id}        - Event page
//! GET  /a-propos               - About the school
//! GET  /contact                - Contact page
//!
//! # Fragments
//! GET  /fragments/header       - Header after one navigation event
//!
//! # Health
//! GET  /health                 - Liveness
//! GET  /health/ready           - Readiness (pings Directus)
//! ```

pub mod events;
pub mod fragments;
pub mod health;
pub mod home;
pub mod pages;
pub mod projects;
pub mod students;

use axum::{Router, extract::OriginalUri, routing::get};
use modart_core::content::ValidationError;

use crate::error::AppError;
use crate::state::AppState;

/// Create the page and fragment routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/etudiants", get(students::index))
        .route("/etudiants/{key}", get(students::show))
        .route("/projets/{id}", get(projects::show))
        .route("/evenements", get(events::index))
        .route("/evenements/{id}", get(events::show))
        .route("/a-propos", get(pages::about))
        .route("/contact", get(pages::contact))
        .route("/fragments/header", get(fragments::header))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
}

/// Fallback for unknown paths.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(uri.path().to_owned())
}

/// Log records a listing set aside.
fn log_rejected(listing: &'static str, rejected: &[ValidationError]) {
    for error in rejected {
        tracing::warn!(listing, %error, "Skipped invalid record");
    }
}
