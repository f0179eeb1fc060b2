//! Mod'Art site library.
//!
//! Server-rendered public website of Mod'Art International Reims ESGI:
//! landing page, student portfolios, projects and events, read from
//! Directus through [`modart_core`]. Built as a library so the router can
//! be driven in tests with an in-memory catalog.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod directus;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod views;

use axum::{Router, middleware::from_fn, middleware::from_fn_with_state};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::state::AppState;

/// Directory served under `/static`.
pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Build the site router.
///
/// Sentry layers are added by the binary around this router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .fallback(routes::not_found)
        .layer(from_fn_with_state(
            state.clone(),
            middleware::security_headers_middleware,
        ))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
