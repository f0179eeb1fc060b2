//! Shared helpers for router tests.
//!
//! The app is built exactly as in `main.rs` (minus Sentry) over an
//! in-memory catalog, so tests exercise the real middleware stack.

#![allow(dead_code, clippy::unwrap_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, Response};
use modart_core::InMemoryContent;
use serde_json::{Value, json};
use tower::ServiceExt;

use modart_site::config::SiteConfig;
use modart_site::state::AppState;

pub const DIRECTUS_URL: &str = "https://cms.modart-reims.fr";

pub const ROLE_ADMIN: &str = "a0000000-0000-4000-8000-000000000001";
pub const ROLE_STUDENT: &str = "a0000000-0000-4000-8000-000000000002";
pub const USER_EMMA: &str = "b0000000-0000-4000-8000-000000000001";
pub const USER_THOMAS: &str = "b0000000-0000-4000-8000-000000000002";
pub const USER_CLAIRE: &str = "b0000000-0000-4000-8000-000000000003";
pub const STUDENT_EMMA: &str = "c0000000-0000-4000-8000-000000000001";
pub const STUDENT_THOMAS: &str = "c0000000-0000-4000-8000-000000000002";
pub const PROJECT_SPRING: &str = "d0000000-0000-4000-8000-000000000001";
pub const PROJECT_COUTURE: &str = "d0000000-0000-4000-8000-000000000002";
pub const PROJECT_ORPHAN: &str = "d0000000-0000-4000-8000-000000000003";
pub const FILE_COVER: &str = "e0000000-0000-4000-8000-000000000001";
pub const FILE_DETAIL: &str = "e0000000-0000-4000-8000-000000000002";
pub const EVENT_SHOW: &str = "f0000000-0000-4000-8000-000000000001";
pub const EVENT_ARCHIVE: &str = "f0000000-0000-4000-8000-000000000002";
pub const EVENT_BROKEN: &str = "f0000000-0000-4000-8000-000000000003";

/// Test configuration pointing at a Directus that is never contacted.
pub fn test_config() -> SiteConfig {
    SiteConfig::from_lookup(|key| match key {
        "MODART_BASE_URL" => Some("https://modart-reims.fr".to_owned()),
        "DIRECTUS_URL" => Some(DIRECTUS_URL.to_owned()),
        "MODART_CONTACT_EMAIL" => Some("contact@modart-reims.fr".to_owned()),
        _ => None,
    })
    .unwrap()
}

fn parse<T: serde::de::DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).unwrap()
}

/// Add the `date_created` audit column to a record.
fn dated(mut record: Value, created: &str) -> Value {
    record["date_created"] = json!(created);
    record
}

/// Two students, their projects, and events in each state.
pub fn catalog() -> InMemoryContent {
    let mut content = InMemoryContent::new();

    content.roles = parse(json!([
        { "id": ROLE_ADMIN, "name": "Administrator" },
        { "id": ROLE_STUDENT, "name": "Étudiant" },
    ]));

    content.users = parse(json!([
        {
            "id": USER_EMMA, "email": "emma.laurent@modart-reims.fr",
            "first_name": "Emma", "last_name": "Laurent",
            "role": ROLE_STUDENT, "status": "active"
        },
        {
            "id": USER_THOMAS, "email": "thomas.dubois@modart-reims.fr",
            "first_name": "Thomas", "last_name": "Dubois",
            "role": ROLE_STUDENT, "status": "active"
        },
        {
            "id": USER_CLAIRE, "email": "claire.martin@modart-reims.fr",
            "first_name": "Claire", "last_name": "Martin",
            "role": ROLE_ADMIN, "status": "active"
        },
    ]));

    content.students = parse(json!([
        dated(json!({
            "id": STUDENT_EMMA, "user_id": USER_EMMA, "slug": "emma-laurent",
            "bio": "Passionnée de couture durable."
        }), "2023-09-01T08:00:00Z"),
        dated(json!({
            "id": STUDENT_THOMAS, "user_id": USER_THOMAS, "slug": "thomas-dubois"
        }), "2023-09-01T08:00:00Z"),
    ]));

    content.projects = parse(json!([
        dated(json!({
            "id": PROJECT_SPRING, "title": "Collection Printemps",
            "description": "Une collection légère.", "student_id": STUDENT_EMMA
        }), "2024-01-15T10:00:00Z"),
        dated(json!({
            "id": PROJECT_COUTURE, "title": "Projet Haute Couture",
            "student_id": STUDENT_THOMAS
        }), "2024-03-10T10:00:00Z"),
        dated(json!({
            "id": PROJECT_ORPHAN, "title": "Projet Orphelin",
            "student_id": "c0000000-0000-4000-8000-0000000000ff"
        }), "2024-02-01T10:00:00Z"),
    ]));

    content.project_images = parse(json!([
        { "id": "e1000000-0000-4000-8000-000000000001", "project_id": PROJECT_SPRING, "image": FILE_DETAIL, "order": 2 },
        { "id": "e1000000-0000-4000-8000-000000000002", "project_id": PROJECT_SPRING, "image": FILE_COVER, "order": 1 },
    ]));

    content.social_networks = parse(json!([
        dated(json!({
            "id": "e2000000-0000-4000-8000-000000000001", "platform": "instagram",
            "link": "https://instagram.com/emma.laurent", "student_id": STUDENT_EMMA
        }), "2023-09-01T08:00:00Z"),
    ]));

    content.events = parse(json!([
        dated(json!({
            "id": EVENT_SHOW, "title": "Défilé de fin d'année",
            "start_date": "2099-06-15T18:00:00Z", "end_date": "2099-06-15T22:00:00Z",
            "location": "Reims", "status": "upcoming"
        }), "2024-01-01T00:00:00Z"),
        dated(json!({
            "id": EVENT_ARCHIVE, "title": "Portes ouvertes 2023",
            "start_date": "2023-02-10T09:00:00Z", "end_date": "2023-02-10T17:00:00Z",
            "status": "past"
        }), "2023-01-01T00:00:00Z"),
        dated(json!({
            "id": EVENT_BROKEN, "title": "Atelier à l'envers",
            "start_date": "2099-05-02T18:00:00Z", "end_date": "2099-05-01T18:00:00Z",
            "status": "upcoming"
        }), "2024-01-01T00:00:00Z"),
    ]));

    content.event_admins = parse(json!([
        { "id": "e3000000-0000-4000-8000-000000000001", "event_id": EVENT_SHOW, "admin_id": USER_CLAIRE },
    ]));

    content
}

/// Build the app over `content`.
pub fn build_test_app(content: InMemoryContent) -> Router {
    let state = AppState::with_content(test_config(), Arc::new(content));
    modart_site::app(state)
}

/// Send a GET request to `uri`.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Read a response body as text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
