//! Application state shared across handlers.

use std::sync::Arc;

use axum::http::HeaderValue;
use modart_core::content::ContentSource;
use modart_core::types::FileId;

use crate::config::SiteConfig;
use crate::directus::{self, DirectusClient, DirectusError};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Handlers read content through the
/// [`ContentSource`] trait, so tests can swap the Directus client for an
/// in-memory catalog.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    content: Arc<dyn ContentSource>,
    csp: HeaderValue,
}

impl AppState {
    /// Create application state backed by Directus.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: SiteConfig) -> Result<Self, DirectusError> {
        let client = DirectusClient::new(&config.directus)?;
        Ok(Self::with_content(config, Arc::new(client)))
    }

    /// Create application state over any content source.
    #[must_use]
    pub fn with_content(config: SiteConfig, content: Arc<dyn ContentSource>) -> Self {
        let csp = content_security_policy(&config);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                content,
                csp,
            }),
        }
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get the content source.
    #[must_use]
    pub fn content(&self) -> &dyn ContentSource {
        self.inner.content.as_ref()
    }

    /// The `Content-Security-Policy` header value for every response.
    #[must_use]
    pub fn csp(&self) -> &HeaderValue {
        &self.inner.csp
    }

    /// Absolute public URL of a site path.
    #[must_use]
    pub fn canonical_url(&self, path: &str) -> Option<String> {
        self.inner.config.base_url.join(path).ok().map(String::from)
    }

    /// Public URL of a Directus file, optionally resized.
    #[must_use]
    pub fn asset_url(&self, file: FileId, width: Option<u32>) -> String {
        directus::asset_url(&self.inner.config.directus.url, file, width)
    }
}

/// Build the CSP, allowing images from the Directus origin.
fn content_security_policy(config: &SiteConfig) -> HeaderValue {
    let origin = config.directus.url.origin().ascii_serialization();
    let policy = format!(
        "default-src 'none'; \
         script-src 'self'; \
         style-src 'self'; \
         font-src 'self'; \
         img-src 'self' {origin}; \
         connect-src 'self'; \
         frame-src 'none'; \
         object-src 'none'; \
         base-uri 'self'; \
         form-action 'self'; \
         frame-ancestors 'none'"
    );
    HeaderValue::from_str(&policy).unwrap_or_else(|_| {
        HeaderValue::from_static(
            "default-src 'none'; script-src 'self'; style-src 'self'; img-src 'self'; \
             connect-src 'self'; frame-ancestors 'none'",
        )
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use modart_core::InMemoryContent;

    use super::*;

    fn config() -> SiteConfig {
        SiteConfig::from_lookup(|key| match key {
            "MODART_BASE_URL" => Some("https://modart-reims.fr".to_owned()),
            "DIRECTUS_URL" => Some("https://cms.modart-reims.fr/".to_owned()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn test_canonical_url_is_rooted_at_base_url() {
        let state = AppState::with_content(config(), Arc::new(InMemoryContent::new()));
        assert_eq!(
            state.canonical_url("/etudiants").as_deref(),
            Some("https://modart-reims.fr/etudiants")
        );
        assert_eq!(
            state.canonical_url("/").as_deref(),
            Some("https://modart-reims.fr/")
        );
    }

    #[test]
    fn test_csp_allows_directus_images() {
        let state = AppState::with_content(config(), Arc::new(InMemoryContent::new()));
        let csp = state.csp().to_str().unwrap();
        assert!(csp.contains("img-src 'self' https://cms.modart-reims.fr;"));
        assert!(csp.starts_with("default-src 'none'"));
    }

    #[test]
    fn test_asset_url_uses_directus_base() {
        let state = AppState::with_content(config(), Arc::new(InMemoryContent::new()));
        let file: FileId = "0b8f6f3e-6a8c-4c1e-9a57-1d1f0f8f3a21".parse().unwrap();
        assert_eq!(
            state.asset_url(file, Some(400)),
            "https://cms.modart-reims.fr/assets/0b8f6f3e-6a8c-4c1e-9a57-1d1f0f8f3a21?width=400&quality=80"
        );
    }
}
