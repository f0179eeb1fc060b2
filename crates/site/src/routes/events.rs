//! Event route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::Utc;
use modart_core::content::{EventWithRelations, User, list_events, resolve_event};
use modart_core::types::EventId;
use tracing::instrument;

use super::log_rejected;
use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;
use crate::views::{EventCard, HeaderView, split_events};

/// Events index template.
#[derive(Template, WebTemplate)]
#[template(path = "events/index.html")]
pub struct EventsIndexTemplate {
    pub header: HeaderView,
    pub upcoming: Vec<EventCard>,
    pub past: Vec<EventCard>,
}

/// Event page template.
#[derive(Template, WebTemplate)]
#[template(path = "events/show.html")]
pub struct EventShowTemplate {
    pub header: HeaderView,
    pub event: EventCard,
    pub description: Option<String>,
    /// Names of the administrators running the event.
    pub organizers: Vec<String>,
}

/// Display upcoming and past events.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let (upcoming, past) = list_events(state.content()).await.map_or_else(
        |e| {
            tracing::error!("Failed to fetch events: {e}");
            (Vec::new(), Vec::new())
        },
        |listing| {
            log_rejected("events", &listing.rejected);
            split_events(&listing.items, Utc::now())
        },
    );

    EventsIndexTemplate {
        header: HeaderView::page(&state, "/evenements"),
        upcoming,
        past,
    }
}

/// Display a single event.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<EventShowTemplate> {
    let id: EventId = id
        .parse()
        .map_err(|_| AppError::NotFound(format!("event {id}")))?;
    let EventWithRelations { event, admins } = resolve_event(state.content(), id).await?;

    Ok(EventShowTemplate {
        header: HeaderView::page(&state, &format!("/evenements/{id}")),
        event: EventCard::from(&event),
        description: event.description,
        organizers: admins.iter().map(User::full_name).collect(),
    })
}
