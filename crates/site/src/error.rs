//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. Page handlers return `Result<T, AppError>`.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use modart_core::content::{FetchError, ResolveError, ValidationError};
use thiserror::Error;

use crate::filters;
use crate::views::HeaderView;

/// Application-level error type for the site.
#[derive(Debug, Error)]
pub enum AppError {
    /// Page or resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Directus could not be reached.
    #[error("Content backend unavailable: {0}")]
    Transient(#[from] FetchError),

    /// Directus returned content that failed validation.
    #[error("Invalid content: {0}")]
    Validation(#[from] ValidationError),
}

impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NotFound { entity, key } => Self::NotFound(format!("{entity} {key}")),
            ResolveError::Validation(e) => Self::Validation(e),
            ResolveError::Transient(e) => Self::Transient(e),
        }
    }
}

/// Shown for missing pages and while the backend is unreachable.
#[derive(Template)]
#[template(path = "errors/not_found.html")]
struct NotFoundPage {
    header: HeaderView,
}

/// Shown when the backend holds content we refuse to render.
#[derive(Template)]
#[template(path = "errors/unavailable.html")]
struct UnavailablePage {
    header: HeaderView,
}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Transient(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Validation(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::NotFound(what) => tracing::debug!(%what, "Not found"),
            Self::Transient(_) => {
                let event_id = sentry::capture_error(&self);
                tracing::error!(
                    error = %self,
                    sentry_event_id = %event_id,
                    "Request error"
                );
            }
            Self::Validation(_) => {
                let event_id = sentry::capture_error(&self);
                tracing::warn!(
                    error = %self,
                    sentry_event_id = %event_id,
                    "Rejected content"
                );
            }
        }

        let status = self.status();
        let header = HeaderView::for_path("");
        let rendered = match self {
            Self::NotFound(_) | Self::Transient(_) => NotFoundPage { header }.render(),
            Self::Validation(_) => UnavailablePage { header }.render(),
        };

        // Don't expose internal error details to clients
        match rendered {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to render error page");
                (status, "Page indisponible").into_response()
            }
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
