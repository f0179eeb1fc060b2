//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MODART_BASE_URL` - Public URL of the site
//! - `DIRECTUS_URL` - Base URL of the Directus instance
//!
//! ## Optional
//! - `MODART_HOST` - Bind address (default: 127.0.0.1)
//! - `MODART_PORT` - Listen port (default: 3000)
//! - `MODART_CONTACT_EMAIL` - Address shown on the contact page
//! - `DIRECTUS_TOKEN` - Static access token (public role is used without one)
//! - `DIRECTUS_CACHE_TTL_SECS` - Response cache lifetime (default: 300)
//! - `DIRECTUS_TIMEOUT_SECS` - Request timeout (default: 10)
//! - `DIRECTUS_MAX_RETRIES` - Retries on connection errors and 5xx (default: 2)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance sample rate (default: 0.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use modart_core::types::Email;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const MIN_TOKEN_LENGTH: usize = 24;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Site configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL of the site
    pub base_url: Url,
    /// Address published on the contact page
    pub contact_email: Option<Email>,
    /// Directus connection settings
    pub directus: DirectusConfig,
    /// Sentry error tracking settings
    pub sentry: SentryConfig,
}

/// Directus connection settings.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct DirectusConfig {
    /// Base URL, e.g. `https://cms.modart-reims.fr`
    pub url: Url,
    /// Static access token sent as a bearer token
    pub token: Option<SecretString>,
    /// How long successful responses stay cached
    pub cache_ttl: Duration,
    /// Per-request timeout
    pub timeout: Duration,
    /// Retries after the first attempt
    pub max_retries: u32,
}

impl std::fmt::Debug for DirectusConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectusConfig")
            .field("url", &self.url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("cache_ttl", &self.cache_ttl)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

/// Sentry error tracking settings.
#[derive(Debug, Clone, Default)]
pub struct SentryConfig {
    pub dsn: Option<String>,
    pub environment: Option<String>,
    pub sample_rate: f32,
    pub traces_sample_rate: f32,
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid, or
    /// if the Directus token fails validation (placeholder detection, entropy
    /// check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Same as [`SiteConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let contact_email = env
            .optional("MODART_CONTACT_EMAIL")
            .map(|raw| {
                Email::parse(&raw).map_err(|e| {
                    ConfigError::InvalidEnvVar("MODART_CONTACT_EMAIL".to_string(), e.to_string())
                })
            })
            .transpose()?;

        Ok(Self {
            host: env.parsed_or("MODART_HOST", "127.0.0.1")?,
            port: env.parsed_or("MODART_PORT", "3000")?,
            base_url: env.http_url("MODART_BASE_URL")?,
            contact_email,
            directus: DirectusConfig::from_env(&env)?,
            sentry: SentryConfig::from_env(&env)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl DirectusConfig {
    fn from_env(env: &Env<'_>) -> Result<Self, ConfigError> {
        let token = env
            .optional("DIRECTUS_TOKEN")
            .map(|raw| validated_token(raw, "DIRECTUS_TOKEN"))
            .transpose()?;

        Ok(Self {
            url: env.http_url("DIRECTUS_URL")?,
            token,
            cache_ttl: Duration::from_secs(env.parsed_or("DIRECTUS_CACHE_TTL_SECS", "300")?),
            timeout: Duration::from_secs(env.parsed_or("DIRECTUS_TIMEOUT_SECS", "10")?),
            max_retries: env.parsed_or("DIRECTUS_MAX_RETRIES", "2")?,
        })
    }
}

impl SentryConfig {
    fn from_env(env: &Env<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            dsn: env.optional("SENTRY_DSN"),
            environment: env.optional("SENTRY_ENVIRONMENT"),
            sample_rate: env.parsed_or("SENTRY_SAMPLE_RATE", "1.0")?,
            traces_sample_rate: env.parsed_or("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup with the parsing helpers shared by every section.
struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    /// An optional variable. Blank values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    fn parsed_or<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key)
            .as_deref()
            .unwrap_or(default)
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }

    /// A required absolute http(s) URL.
    fn http_url(&self, key: &str) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.required(key)?)
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                "must be an http(s) URL".to_string(),
            ));
        }
        Ok(url)
    }
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is long enough, not a placeholder, and has
/// sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_TOKEN_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {MIN_TOKEN_LENGTH} characters (got {})",
                secret.len()
            ),
        ));
    }

    let lower = secret.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Generate the token in the Directus user settings."
            ),
        ));
    }

    Ok(())
}

fn validated_token(value: String, key: &str) -> Result<SecretString, ConfigError> {
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    const TOKEN: &str = "q7Zr2mXk9VbT4wLp1NcY8sHd3GfJ6eUa";

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn minimal() -> Vec<(&'static str, &'static str)> {
        vec![
            ("MODART_BASE_URL", "https://www.modart-reims.fr"),
            ("DIRECTUS_URL", "https://cms.modart-reims.fr"),
        ]
    }

    #[test]
    fn test_defaults() {
        let config = SiteConfig::from_lookup(lookup(&minimal())).unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.directus.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.directus.timeout, Duration::from_secs(10));
        assert_eq!(config.directus.max_retries, 2);
        assert!(config.directus.token.is_none());
        assert!(config.contact_email.is_none());
        assert!(config.sentry.dsn.is_none());
        assert!((config.sentry.sample_rate - 1.0).abs() < f32::EPSILON);
        assert!(config.sentry.traces_sample_rate.abs() < f32::EPSILON);
    }

    #[test]
    fn test_missing_directus_url() {
        let err =
            SiteConfig::from_lookup(lookup(&[("MODART_BASE_URL", "https://www.modart-reims.fr")]))
                .unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(key) if key == "DIRECTUS_URL"));
    }

    #[test]
    fn test_blank_is_unset() {
        let mut vars = minimal();
        vars.push(("DIRECTUS_TOKEN", "   "));
        vars.push(("MODART_PORT", ""));
        let config = SiteConfig::from_lookup(lookup(&vars)).unwrap();
        assert!(config.directus.token.is_none());
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_overrides() {
        let mut vars = minimal();
        vars.extend([
            ("MODART_HOST", "0.0.0.0"),
            ("MODART_PORT", "8080"),
            ("MODART_CONTACT_EMAIL", "contact@modart-reims.fr"),
            ("DIRECTUS_TOKEN", TOKEN),
            ("DIRECTUS_CACHE_TTL_SECS", "60"),
            ("DIRECTUS_MAX_RETRIES", "0"),
            ("SENTRY_ENVIRONMENT", "staging"),
        ]);
        let config = SiteConfig::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(
            config.contact_email.as_ref().map(Email::as_str),
            Some("contact@modart-reims.fr")
        );
        assert_eq!(
            config.directus.token.as_ref().map(ExposeSecret::expose_secret),
            Some(TOKEN)
        );
        assert_eq!(config.directus.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.directus.max_retries, 0);
        assert_eq!(config.sentry.environment.as_deref(), Some("staging"));
    }

    #[test]
    fn test_invalid_port() {
        let mut vars = minimal();
        vars.push(("MODART_PORT", "http"));
        let err = SiteConfig::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "MODART_PORT"));
    }

    #[test]
    fn test_directus_url_must_be_http() {
        let vars = [
            ("MODART_BASE_URL", "https://www.modart-reims.fr"),
            ("DIRECTUS_URL", "mailto:cms@modart-reims.fr"),
        ];
        let err = SiteConfig::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "DIRECTUS_URL"));
    }

    #[test]
    fn test_placeholder_token_rejected() {
        let mut vars = minimal();
        vars.push(("DIRECTUS_TOKEN", "your-directus-token-goes-here"));
        let err = SiteConfig::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_single_char() {
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_short() {
        assert!(validate_secret_strength("aB3$xY9!", "TEST_VAR").is_err());
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength(&"ab".repeat(20), "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        assert!(validate_secret_strength(TOKEN, "TEST_VAR").is_ok());
    }

    #[test]
    fn test_directus_config_debug_redacts_token() {
        let mut vars = minimal();
        vars.push(("DIRECTUS_TOKEN", TOKEN));
        let config = SiteConfig::from_lookup(lookup(&vars)).unwrap();

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("cms.modart-reims.fr"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains(TOKEN));
    }
}
