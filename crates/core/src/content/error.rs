//! Error taxonomy for reading content.
//!
//! - [`ValidationError`]: a record came back absent a required field, with a
//!   malformed value, or breaking an invariant.
//! - [`FetchError`]: the backend could not be reached. Presumed transient.
//! - [`ResolveError`]: what a resolver reports for a single entity.

use thiserror::Error;

/// A raw record failed validation.
///
/// Reported to the caller, never coerced into a default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent or null.
    #[error("{entity}: missing required field `{field}`")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    /// A field is present but its value cannot be interpreted.
    #[error("{entity}: malformed `{field}`: {reason}")]
    Malformed {
        entity: &'static str,
        field: &'static str,
        reason: String,
    },

    /// An event ends before it starts.
    #[error("event {id}: end_date {end} is before start_date {start}")]
    EventEndsBeforeStart {
        id: String,
        start: String,
        end: String,
    },

    /// More than one student claims the same slug.
    #[error("slug `{slug}` is shared by {count} students")]
    DuplicateSlug { slug: String, count: usize },

    /// A record points at another record that does not exist.
    #[error("{entity} {id} references missing {target} {target_id}")]
    DanglingReference {
        entity: &'static str,
        id: String,
        target: &'static str,
        target_id: String,
    },

    /// A related record handed to a composition belongs to another parent.
    #[error("{entity} {id} does not belong to {parent} {parent_id}")]
    ForeignRecord {
        entity: &'static str,
        id: String,
        parent: &'static str,
        parent_id: String,
    },
}

impl ValidationError {
    pub(crate) const fn missing(entity: &'static str, field: &'static str) -> Self {
        Self::MissingField { entity, field }
    }

    pub(crate) fn malformed(
        entity: &'static str,
        field: &'static str,
        reason: impl ToString,
    ) -> Self {
        Self::Malformed {
            entity,
            field,
            reason: reason.to_string(),
        }
    }
}

/// The content backend could not serve a request.
///
/// Wraps the collaborator's own error so the core stays independent of any
/// HTTP client.
#[derive(Debug, Error)]
#[error("content fetch failed: {source}")]
pub struct FetchError {
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl FetchError {
    /// Wrap a collaborator error.
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

/// Why an entity could not be resolved.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The requested entity does not exist.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// The backend returned a record that failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backend could not be reached.
    #[error(transparent)]
    Transient(#[from] FetchError),
}

impl ResolveError {
    pub(crate) fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Whether the presentation layer should show its "not found" state.
    ///
    /// An unresolved fetch displays the same way as a missing entity.
    #[must_use]
    pub const fn displays_as_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Transient(_))
    }
}
