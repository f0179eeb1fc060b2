//! Landing page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use chrono::Utc;
use modart_core::content::{list_events, recent_projects};
use tracing::instrument;

use super::log_rejected;
use crate::filters;
use crate::state::AppState;
use crate::views::{EventCard, HeaderView, ProjectCard, split_events};

/// Number of projects in the featured gallery.
const FEATURED_PROJECTS: usize = 6;

/// Number of events in the preview.
const UPCOMING_EVENTS: usize = 3;

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub header: HeaderView,
    /// Newest projects, newest first.
    pub projects: Vec<ProjectCard>,
    /// Next events, soonest first.
    pub events: Vec<EventCard>,
}

/// Display the landing page.
///
/// Each section degrades to empty when its content cannot be read.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let (projects, events) = futures::join!(
        recent_projects(state.content(), FEATURED_PROJECTS),
        list_events(state.content()),
    );

    let projects = projects.map_or_else(
        |e| {
            tracing::error!("Failed to fetch featured projects: {e}");
            Vec::new()
        },
        |listing| {
            log_rejected("featured_projects", &listing.rejected);
            listing
                .items
                .iter()
                .map(|project| ProjectCard::new(&state, project))
                .collect()
        },
    );

    let events = events.map_or_else(
        |e| {
            tracing::error!("Failed to fetch events: {e}");
            Vec::new()
        },
        |listing| {
            log_rejected("events", &listing.rejected);
            let (mut upcoming, _) = split_events(&listing.items, Utc::now());
            upcoming.truncate(UPCOMING_EVENTS);
            upcoming
        },
    );

    HomeTemplate {
        header: HeaderView::page(&state, "/"),
        projects,
        events,
    }
}
