//! Directus REST client.
//!
//! # Architecture
//!
//! - Directus owns the content; the site only reads it over REST
//! - Responses are returned raw (`Raw*` records) and validated by the
//!   resolvers in `modart-core`
//! - In-memory caching via `moka` (TTL from `DIRECTUS_CACHE_TTL_SECS`)
//! - Connection failures and 5xx responses are retried with a linear
//!   backoff
//!
//! # Endpoints
//!
//! ```text
//! GET /server/ping
//! GET /roles
//! GET /users[/{id}]
//! GET /items/{collection}[/{id}]?filter[...]
//! GET /assets/{file_id}?width=&quality=
//! ```
//!
//! Every JSON response is wrapped in `{"data": ...}`. Directus answers 403
//! rather than 404 for items the token may not see, so both mean "absent"
//! on single-item reads.

mod cache;

pub use cache::{CacheKey, CacheValue, Cached};

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, TryFutureExt};
use modart_core::content::{
    ContentSource, FetchError, FetchResult, RawEvent, RawEventAdmin, RawProject,
    RawProjectImage, RawRole, RawSocialNetwork, RawStudent, RawUser,
};
use modart_core::types::{EventId, FileId, ProjectId, Slug, StudentId, UserId};
use moka::future::Cache;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::DirectusConfig;

const CACHE_CAPACITY: u64 = 1000;
const RETRY_BACKOFF: Duration = Duration::from_millis(250);
const BODY_LOG_LIMIT: usize = 500;

/// Columns read from `directus_users`. The password hash is never requested.
const USER_FIELDS: &str = "id,email,first_name,last_name,role,status";

/// Errors that can occur when talking to Directus.
#[derive(Debug, Error)]
pub enum DirectusError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Directus answered with a non-success status.
    #[error("Directus returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by Directus.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The configured base URL cannot carry a path.
    #[error("Directus URL cannot be used as a base: {0}")]
    InvalidBase(String),
}

impl DirectusError {
    /// Connection failures, timeouts and 5xx responses.
    fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_connect() || e.is_timeout(),
            Self::Status { status, .. } => status.is_server_error(),
            Self::Parse(_) | Self::RateLimited(_) | Self::InvalidBase(_) => false,
        }
    }
}

impl From<DirectusError> for FetchError {
    fn from(error: DirectusError) -> Self {
        Self::new(error)
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Outcome of a request that reached Directus.
enum Fetched {
    Body(String),
    Absent(StatusCode),
}

// =============================================================================
// DirectusClient
// =============================================================================

/// Client for the Directus REST API.
///
/// Cheap to clone. Successful responses are cached for the configured TTL;
/// failures are never cached.
#[derive(Clone)]
pub struct DirectusClient {
    inner: Arc<DirectusClientInner>,
}

struct DirectusClientInner {
    http: reqwest::Client,
    base: Url,
    token: Option<SecretString>,
    max_retries: u32,
    cache: Cache<CacheKey, CacheValue>,
}

impl DirectusClient {
    /// Create a new Directus client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the base URL
    /// cannot carry a path.
    pub fn new(config: &DirectusConfig) -> Result<Self, DirectusError> {
        if config.url.cannot_be_a_base() {
            return Err(DirectusError::InvalidBase(config.url.to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("modart-site/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(DirectusClientInner {
                http,
                base: config.url.clone(),
                token: config.token.clone(),
                max_retries: config.max_retries,
                cache,
            }),
        })
    }

    /// Build `{base}/{segments...}?{query}`.
    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, DirectusError> {
        let mut url = self.inner.base.clone();
        url.path_segments_mut()
            .map_err(|()| DirectusError::InvalidBase(self.inner.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Send a GET, retrying connection failures and 5xx responses.
    async fn send(&self, url: &Url) -> Result<Fetched, DirectusError> {
        let mut attempt = 0;
        loop {
            match self.send_once(url).await {
                Err(e) if attempt < self.inner.max_retries && e.is_retryable() => {
                    attempt += 1;
                    warn!(error = %e, attempt, path = url.path(), "Retrying Directus request");
                    tokio::time::sleep(RETRY_BACKOFF * attempt).await;
                }
                result => return result,
            }
        }
    }

    async fn send_once(&self, url: &Url) -> Result<Fetched, DirectusError> {
        let mut request = self.inner.http.get(url.clone());
        if let Some(token) = &self.inner.token {
            request = request.bearer_auth(token.expose_secret());
        }
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(DirectusError::RateLimited(retry_after));
        }

        if status == StatusCode::NOT_FOUND || status == StatusCode::FORBIDDEN {
            return Ok(Fetched::Absent(status));
        }

        let body = response.text().await?;

        if !status.is_success() {
            let body: String = body.chars().take(BODY_LOG_LIMIT).collect();
            tracing::error!(
                status = %status,
                path = url.path(),
                body = %body,
                "Directus returned non-success status"
            );
            return Err(DirectusError::Status { status, body });
        }

        Ok(Fetched::Body(body))
    }

    /// Read a single record. 403 and 404 yield `None`.
    async fn item<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>, DirectusError> {
        match self.send(&url).await? {
            Fetched::Body(body) => {
                let envelope: Envelope<Option<T>> = decode(&body)?;
                Ok(envelope.data)
            }
            Fetched::Absent(status) => {
                debug!(%status, path = url.path(), "Directus item absent");
                Ok(None)
            }
        }
    }

    /// Read a collection. 403 and 404 are errors here: the collection
    /// itself is unreadable.
    async fn list<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, DirectusError> {
        match self.send(&url).await? {
            Fetched::Body(body) => {
                let envelope: Envelope<Vec<T>> = decode(&body)?;
                Ok(envelope.data)
            }
            Fetched::Absent(status) => Err(DirectusError::Status {
                status,
                body: String::new(),
            }),
        }
    }

    /// Serve `key` from the cache, or run `fetch` and cache its result.
    async fn cached<T, F>(&self, key: CacheKey, fetch: F) -> Result<T, DirectusError>
    where
        T: Cached + Clone,
        F: Future<Output = Result<T, DirectusError>>,
    {
        if let Some(value) = self.inner.cache.get(&key).await.and_then(T::from_value) {
            debug!(?key, "Cache hit");
            return Ok(value);
        }

        let value = fetch.await?;
        self.inner.cache.insert(key, value.clone().into_value()).await;
        Ok(value)
    }

    fn collection(
        &self,
        collection: &str,
        filter: Option<(&str, &str)>,
    ) -> Result<Url, DirectusError> {
        let mut query = vec![("limit", "-1")];
        if let Some(filter) = filter {
            query.push(filter);
        }
        self.endpoint(&["items", collection], &query)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Check that Directus is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the answer is not a success.
    #[instrument(skip(self))]
    pub async fn ping_server(&self) -> Result<(), DirectusError> {
        let url = self.endpoint(&["server", "ping"], &[])?;
        match self.send(&url).await? {
            Fetched::Body(_) => Ok(()),
            Fetched::Absent(status) => Err(DirectusError::Status {
                status,
                body: String::new(),
            }),
        }
    }

    /// All roles.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn get_roles(&self) -> Result<Vec<RawRole>, DirectusError> {
        self.cached(CacheKey::Roles, async {
            self.list(self.endpoint(&["roles"], &[("limit", "-1"), ("fields", "id,name")])?)
                .await
        })
        .await
    }

    /// A single account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_user(&self, id: UserId) -> Result<Option<RawUser>, DirectusError> {
        self.cached(CacheKey::User(id), async {
            let id = id.to_string();
            self.item(self.endpoint(&["users", &id], &[("fields", USER_FIELDS)])?)
                .await
        })
        .await
    }

    /// The accounts among `ids` that exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(count = ids.len()))]
    pub async fn get_users(&self, ids: &[UserId]) -> Result<Vec<RawUser>, DirectusError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.cached(CacheKey::Users(ids.to_vec()), async {
            let ids = ids
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            let url = self.endpoint(
                &["users"],
                &[
                    ("limit", "-1"),
                    ("fields", USER_FIELDS),
                    ("filter[id][_in]", ids.as_str()),
                ],
            )?;
            self.list(url).await
        })
        .await
    }

    /// A single student.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_student(&self, id: StudentId) -> Result<Option<RawStudent>, DirectusError> {
        self.cached(CacheKey::Student(id), async {
            let id = id.to_string();
            self.item(self.endpoint(&["items", "students", &id], &[])?)
                .await
        })
        .await
    }

    /// Every student with this slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_students_by_slug(
        &self,
        slug: &Slug,
    ) -> Result<Vec<RawStudent>, DirectusError> {
        self.cached(CacheKey::StudentsBySlug(slug.clone()), async {
            self.list(self.collection("students", Some(("filter[slug][_eq]", slug.as_str())))?)
                .await
        })
        .await
    }

    /// All students.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn get_students(&self) -> Result<Vec<RawStudent>, DirectusError> {
        self.cached(CacheKey::Students, async {
            self.list(self.collection("students", None)?).await
        })
        .await
    }

    /// A single project.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_project(&self, id: ProjectId) -> Result<Option<RawProject>, DirectusError> {
        self.cached(CacheKey::Project(id), async {
            let id = id.to_string();
            self.item(self.endpoint(&["items", "projects", &id], &[])?)
                .await
        })
        .await
    }

    /// Projects of one student.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(student = %student))]
    pub async fn get_projects_by_student(
        &self,
        student: StudentId,
    ) -> Result<Vec<RawProject>, DirectusError> {
        self.cached(CacheKey::ProjectsByStudent(student), async {
            let student = student.to_string();
            self.list(self.collection("projects", Some(("filter[student_id][_eq]", student.as_str())))?)
                .await
        })
        .await
    }

    /// The `limit` newest projects.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn get_recent_projects(&self, limit: usize) -> Result<Vec<RawProject>, DirectusError> {
        self.cached(CacheKey::RecentProjects(limit), async {
            let limit = limit.to_string();
            let url = self.endpoint(
                &["items", "projects"],
                &[("sort", "-date_created"), ("limit", limit.as_str())],
            )?;
            self.list(url).await
        })
        .await
    }

    /// Images of one project.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(project = %project))]
    pub async fn get_project_images(
        &self,
        project: ProjectId,
    ) -> Result<Vec<RawProjectImage>, DirectusError> {
        self.cached(CacheKey::ProjectImages(project), async {
            let project = project.to_string();
            self.list(self.collection(
                "project_images",
                Some(("filter[project_id][_eq]", project.as_str())),
            )?)
            .await
        })
        .await
    }

    /// Social links of one student.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(student = %student))]
    pub async fn get_social_networks(
        &self,
        student: StudentId,
    ) -> Result<Vec<RawSocialNetwork>, DirectusError> {
        self.cached(CacheKey::SocialNetworks(student), async {
            let student = student.to_string();
            self.list(self.collection(
                "social_networks",
                Some(("filter[student_id][_eq]", student.as_str())),
            )?)
            .await
        })
        .await
    }

    /// A single event.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_event(&self, id: EventId) -> Result<Option<RawEvent>, DirectusError> {
        self.cached(CacheKey::Event(id), async {
            let id = id.to_string();
            self.item(self.endpoint(&["items", "events", &id], &[])?)
                .await
        })
        .await
    }

    /// All events.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn get_events(&self) -> Result<Vec<RawEvent>, DirectusError> {
        self.cached(CacheKey::Events, async {
            self.list(self.collection("events", None)?).await
        })
        .await
    }

    /// Admin grants of one event.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(event = %event))]
    pub async fn get_event_admins(
        &self,
        event: EventId,
    ) -> Result<Vec<RawEventAdmin>, DirectusError> {
        self.cached(CacheKey::EventAdmins(event), async {
            let event = event.to_string();
            self.list(self.collection(
                "events_admins",
                Some(("filter[event_id][_eq]", event.as_str())),
            )?)
            .await
        })
        .await
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, DirectusError> {
    serde_json::from_str(body).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %body.chars().take(BODY_LOG_LIMIT).collect::<String>(),
            "Failed to parse Directus response"
        );
        DirectusError::Parse(e)
    })
}

impl ContentSource for DirectusClient {
    fn ping(&self) -> BoxFuture<'_, FetchResult<()>> {
        self.ping_server().err_into::<FetchError>().boxed()
    }

    fn roles(&self) -> BoxFuture<'_, FetchResult<Vec<RawRole>>> {
        self.get_roles().err_into::<FetchError>().boxed()
    }

    fn user(&self, id: UserId) -> BoxFuture<'_, FetchResult<Option<RawUser>>> {
        self.get_user(id).err_into::<FetchError>().boxed()
    }

    fn users<'a>(&'a self, ids: &'a [UserId]) -> BoxFuture<'a, FetchResult<Vec<RawUser>>> {
        self.get_users(ids).err_into::<FetchError>().boxed()
    }

    fn student(&self, id: StudentId) -> BoxFuture<'_, FetchResult<Option<RawStudent>>> {
        self.get_student(id).err_into::<FetchError>().boxed()
    }

    fn students_by_slug<'a>(
        &'a self,
        slug: &'a Slug,
    ) -> BoxFuture<'a, FetchResult<Vec<RawStudent>>> {
        self.get_students_by_slug(slug).err_into::<FetchError>().boxed()
    }

    fn students(&self) -> BoxFuture<'_, FetchResult<Vec<RawStudent>>> {
        self.get_students().err_into::<FetchError>().boxed()
    }

    fn project(&self, id: ProjectId) -> BoxFuture<'_, FetchResult<Option<RawProject>>> {
        self.get_project(id).err_into::<FetchError>().boxed()
    }

    fn projects_by_student(
        &self,
        student: StudentId,
    ) -> BoxFuture<'_, FetchResult<Vec<RawProject>>> {
        self.get_projects_by_student(student).err_into::<FetchError>().boxed()
    }

    fn recent_projects(&self, limit: usize) -> BoxFuture<'_, FetchResult<Vec<RawProject>>> {
        self.get_recent_projects(limit).err_into::<FetchError>().boxed()
    }

    fn project_images(
        &self,
        project: ProjectId,
    ) -> BoxFuture<'_, FetchResult<Vec<RawProjectImage>>> {
        self.get_project_images(project).err_into::<FetchError>().boxed()
    }

    fn social_networks(
        &self,
        student: StudentId,
    ) -> BoxFuture<'_, FetchResult<Vec<RawSocialNetwork>>> {
        self.get_social_networks(student).err_into::<FetchError>().boxed()
    }

    fn event(&self, id: EventId) -> BoxFuture<'_, FetchResult<Option<RawEvent>>> {
        self.get_event(id).err_into::<FetchError>().boxed()
    }

    fn events(&self) -> BoxFuture<'_, FetchResult<Vec<RawEvent>>> {
        self.get_events().err_into::<FetchError>().boxed()
    }

    fn event_admins(&self, event: EventId) -> BoxFuture<'_, FetchResult<Vec<RawEventAdmin>>> {
        self.get_event_admins(event).err_into::<FetchError>().boxed()
    }
}

// =============================================================================
// Assets
// =============================================================================

/// Public URL of a stored file, optionally resized to `width` pixels.
///
/// Resized variants are re-encoded at quality 80.
#[must_use]
pub fn asset_url(base: &Url, file: FileId, width: Option<u32>) -> String {
    let mut url = base.clone();
    let id = file.to_string();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().extend(["assets", id.as_str()]);
    }
    if let Some(width) = width {
        url.query_pairs_mut()
            .append_pair("width", &width.to_string())
            .append_pair("quality", "80");
    }
    url.into()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const USER_ID: &str = "1c7e9a3b-5d2f-4b8e-9a6c-0e4d2f8b1a73";
    const TOKEN: &str = "q7Zr2mXk9VbT4wLp1NcY8sHd3GfJ6eUa";

    fn config(server: &MockServer) -> DirectusConfig {
        DirectusConfig {
            url: server.uri().parse().unwrap(),
            token: Some(SecretString::from(TOKEN)),
            cache_ttl: Duration::from_secs(60),
            timeout: Duration::from_secs(2),
            max_retries: 2,
        }
    }

    fn user_body() -> serde_json::Value {
        json!({
            "data": {
                "id": USER_ID,
                "email": "emma.laurent@modart-reims.fr",
                "first_name": "Emma",
                "last_name": "Laurent",
                "role": null,
                "status": "active"
            }
        })
    }

    #[tokio::test]
    async fn test_get_user_sends_token_and_caches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/users/{USER_ID}")))
            .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
            .and(query_param("fields", USER_FIELDS))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = DirectusClient::new(&config(&server)).unwrap();
        let id: UserId = USER_ID.parse().unwrap();

        let first = client.get_user(id).await.unwrap().unwrap();
        let second = client.get_user(id).await.unwrap().unwrap();

        assert_eq!(first.first_name.as_deref(), Some("Emma"));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_forbidden_item_is_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/items/events/{USER_ID}")))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "errors": [{"message": "You don't have permission to access this."}]
            })))
            .mount(&server)
            .await;

        let client = DirectusClient::new(&config(&server)).unwrap();
        let event = client.get_event(USER_ID.parse().unwrap()).await.unwrap();
        assert!(event.is_none());
    }

    #[tokio::test]
    async fn test_forbidden_collection_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items/events"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = DirectusClient::new(&config(&server)).unwrap();
        let err = client.get_events().await.unwrap_err();
        assert!(matches!(err, DirectusError::Status { status, .. } if status == StatusCode::FORBIDDEN));
    }

    #[tokio::test]
    async fn test_filters_by_slug() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items/students"))
            .and(query_param("filter[slug][_eq]", "emma-laurent"))
            .and(query_param("limit", "-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": USER_ID, "slug": "emma-laurent"}]
            })))
            .mount(&server)
            .await;

        let client = DirectusClient::new(&config(&server)).unwrap();
        let slug = Slug::parse("emma-laurent").unwrap();
        let students = client.get_students_by_slug(&slug).await.unwrap();

        assert_eq!(students.len(), 1);
        assert_eq!(students.first().unwrap().slug.as_deref(), Some("emma-laurent"));
    }

    #[tokio::test]
    async fn test_retries_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/roles"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/roles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": USER_ID, "name": "Administrator"}]
            })))
            .mount(&server)
            .await;

        let client = DirectusClient::new(&config(&server)).unwrap();
        let roles = client.get_roles().await.unwrap();
        assert_eq!(roles.len(), 1);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items/students"))
            .respond_with(ResponseTemplate::new(502))
            .expect(3)
            .mount(&server)
            .await;

        let client = DirectusClient::new(&config(&server)).unwrap();
        let err = client.get_students().await.unwrap_err();
        assert!(matches!(err, DirectusError::Status { status, .. } if status == StatusCode::BAD_GATEWAY));
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items/events"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(3)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/items/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;

        let client = DirectusClient::new(&config(&server)).unwrap();
        assert!(client.get_events().await.is_err());
        assert!(client.get_events().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rate_limit_reports_retry_after() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items/events"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
            .expect(1)
            .mount(&server)
            .await;

        let client = DirectusClient::new(&config(&server)).unwrap();
        let err = client.get_events().await.unwrap_err();
        assert!(matches!(err, DirectusError::RateLimited(7)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_fetch_error() {
        let config = DirectusConfig {
            url: "http://127.0.0.1:9".parse().unwrap(),
            token: None,
            cache_ttl: Duration::from_secs(60),
            timeout: Duration::from_millis(200),
            max_retries: 0,
        };
        let client = DirectusClient::new(&config).unwrap();
        let source: &dyn ContentSource = &client;
        assert!(source.events().await.is_err());
    }

    #[test]
    fn test_asset_url() {
        let base: Url = "https://cms.modart-reims.fr/".parse().unwrap();
        let file: FileId = "0f2b4d6e-8a1c-4e3f-95b7-d9f1a3c5e7b9".parse().unwrap();

        assert_eq!(
            asset_url(&base, file, None),
            "https://cms.modart-reims.fr/assets/0f2b4d6e-8a1c-4e3f-95b7-d9f1a3c5e7b9"
        );
        assert_eq!(
            asset_url(&base, file, Some(600)),
            "https://cms.modart-reims.fr/assets/0f2b4d6e-8a1c-4e3f-95b7-d9f1a3c5e7b9?width=600&quality=80"
        );
    }
}
