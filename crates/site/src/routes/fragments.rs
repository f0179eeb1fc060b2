//! Header fragment for the navigation script.
//!
//! The script sends the state it is showing plus one event; the server
//! applies the transition and returns the re-rendered header, which carries
//! the new state in its data attributes.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::Query;
use modart_core::navigation::{MenuState, NavEvent, NavState, ScrollState};
use serde::Deserialize;
use tracing::instrument;

use crate::views::HeaderView;

/// Which transition to apply.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderAction {
    Scroll,
    Toggle,
    Route,
}

/// Query parameters of `GET /fragments/header`.
#[derive(Debug, Deserialize)]
pub struct HeaderQuery {
    #[serde(default)]
    pub menu: MenuState,
    #[serde(default)]
    pub scroll: ScrollState,
    pub event: HeaderAction,
    /// Vertical scroll offset, for `event=scroll`.
    pub offset: Option<f64>,
    /// Path of the page showing the header.
    #[serde(default = "root_path")]
    pub path: String,
}

fn root_path() -> String {
    "/".to_owned()
}

impl HeaderQuery {
    /// The state after this query's event.
    #[must_use]
    pub fn next_state(&self) -> NavState {
        let current = NavState {
            menu: self.menu,
            scroll: self.scroll,
        };
        let event = match self.event {
            HeaderAction::Scroll => NavEvent::Scrolled {
                offset: self.offset.unwrap_or(0.0),
            },
            HeaderAction::Toggle => NavEvent::MenuToggled,
            HeaderAction::Route => NavEvent::RouteChanged,
        };
        current.apply(event)
    }
}

/// Header partial.
#[derive(Template, WebTemplate)]
#[template(path = "partials/header.html")]
pub struct HeaderTemplate {
    pub header: HeaderView,
}

/// Apply one navigation event and render the header.
#[instrument]
pub async fn header(Query(query): Query<HeaderQuery>) -> HeaderTemplate {
    HeaderTemplate {
        header: HeaderView::with_state(query.next_state(), &query.path),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Uri;

    use super::*;

    fn query(raw: &str) -> HeaderQuery {
        let uri: Uri = format!("/fragments/header?{raw}").parse().unwrap();
        Query::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn test_scroll_past_threshold() {
        let next = query("menu=closed&scroll=at_top&event=scroll&offset=15").next_state();
        assert_eq!(next.scroll, ScrollState::Scrolled);
        assert_eq!(next.menu, MenuState::Closed);
    }

    #[test]
    fn test_toggle_opens_menu() {
        let next = query("menu=closed&scroll=scrolled&event=toggle").next_state();
        assert_eq!(next.menu, MenuState::Open);
        assert_eq!(next.scroll, ScrollState::Scrolled);
    }

    #[test]
    fn test_route_closes_menu() {
        let next = query("menu=open&scroll=scrolled&event=route").next_state();
        assert_eq!(next.menu, MenuState::Closed);
        assert_eq!(next.scroll, ScrollState::Scrolled);
    }

    #[test]
    fn test_missing_state_defaults_to_initial() {
        let q = query("event=scroll");
        assert_eq!(q.path, "/");
        assert_eq!(q.next_state(), NavState::INITIAL);
    }
}
