//! Raw records as returned by the Directus REST API.
//!
//! Every field is optional: Directus returns `null` for unset columns and
//! omits fields the access token cannot read. Conversion into the typed
//! entities happens through `TryFrom`, which reports the first absent or
//! malformed field instead of filling in a default.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::entities::{
    Audit, Credential, Event, EventAdmin, Project, ProjectImage, Role, SocialNetwork, Student,
    User,
};
use super::error::ValidationError;
use crate::types::{Email, EventId, EventStatus, Platform, Slug, UserStatus};

/// Raw `directus_roles` row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRole {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Raw `directus_users` row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawUser {
    pub id: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}

/// Audit columns shared by the site collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawAudit {
    pub date_created: Option<String>,
    pub date_updated: Option<String>,
    pub user_created: Option<String>,
    pub user_updated: Option<String>,
}

/// Raw `students` row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawStudent {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub slug: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    #[serde(flatten)]
    pub audit: RawAudit,
}

/// Raw `projects` row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawProject {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub student_id: Option<String>,
    pub link: Option<String>,
    #[serde(flatten)]
    pub audit: RawAudit,
}

/// Raw `project_images` row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawProjectImage {
    pub id: Option<String>,
    pub project_id: Option<String>,
    pub image: Option<String>,
    pub order: Option<i32>,
}

/// Raw `events` row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEvent {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    #[serde(flatten)]
    pub audit: RawAudit,
}

/// Raw `events_admins` row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEventAdmin {
    pub id: Option<String>,
    pub event_id: Option<String>,
    pub admin_id: Option<String>,
}

/// Raw `social_networks` row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSocialNetwork {
    pub id: Option<String>,
    pub platform: Option<String>,
    pub link: Option<String>,
    pub student_id: Option<String>,
    #[serde(flatten)]
    pub audit: RawAudit,
}

// =============================================================================
// Field Helpers
// =============================================================================

fn required<T>(
    value: Option<T>,
    entity: &'static str,
    field: &'static str,
) -> Result<T, ValidationError> {
    value.ok_or_else(|| ValidationError::missing(entity, field))
}

/// A required text column. Blank strings count as absent.
fn required_text(
    value: Option<String>,
    entity: &'static str,
    field: &'static str,
) -> Result<String, ValidationError> {
    optional_text(value).ok_or_else(|| ValidationError::missing(entity, field))
}

/// An optional text column. Directus stores cleared inputs as `""` or `null`.
fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

fn parse_id<I>(
    value: Option<String>,
    entity: &'static str,
    field: &'static str,
) -> Result<I, ValidationError>
where
    I: std::str::FromStr<Err = uuid::Error>,
{
    let raw = required(value, entity, field)?;
    raw.parse()
        .map_err(|e| ValidationError::malformed(entity, field, e))
}

fn parse_optional_id<I>(
    value: Option<String>,
    entity: &'static str,
    field: &'static str,
) -> Result<Option<I>, ValidationError>
where
    I: std::str::FromStr<Err = uuid::Error>,
{
    optional_text(value)
        .map(|raw| {
            raw.parse()
                .map_err(|e| ValidationError::malformed(entity, field, e))
        })
        .transpose()
}

/// Parse a Directus timestamp.
///
/// `timestamp` columns come back as RFC 3339 with an offset; `datetime`
/// columns have no offset and are read as UTC; `date` columns are read as
/// midnight UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| format!("not a timestamp: {raw:?}"))
}

fn required_timestamp(
    value: Option<String>,
    entity: &'static str,
    field: &'static str,
) -> Result<DateTime<Utc>, ValidationError> {
    let raw = required(value, entity, field)?;
    parse_timestamp(&raw).map_err(|reason| ValidationError::malformed(entity, field, reason))
}

fn optional_timestamp(
    value: Option<String>,
    entity: &'static str,
    field: &'static str,
) -> Result<Option<DateTime<Utc>>, ValidationError> {
    optional_text(value)
        .map(|raw| {
            parse_timestamp(&raw).map_err(|reason| ValidationError::malformed(entity, field, reason))
        })
        .transpose()
}

/// Absolute http(s) URL check for outbound links.
fn external_link(
    value: String,
    entity: &'static str,
    field: &'static str,
) -> Result<String, ValidationError> {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !host.contains(char::is_whitespace) => Ok(value),
        _ => Err(ValidationError::malformed(
            entity,
            field,
            "expected an absolute http(s) URL",
        )),
    }
}

fn audit(raw: RawAudit, entity: &'static str) -> Result<Audit, ValidationError> {
    Ok(Audit {
        date_created: required_timestamp(raw.date_created, entity, "date_created")?,
        date_updated: optional_timestamp(raw.date_updated, entity, "date_updated")?,
        user_created: parse_optional_id(raw.user_created, entity, "user_created")?,
        user_updated: parse_optional_id(raw.user_updated, entity, "user_updated")?,
    })
}

// =============================================================================
// Conversions
// =============================================================================

impl TryFrom<RawRole> for Role {
    type Error = ValidationError;

    fn try_from(raw: RawRole) -> Result<Self, Self::Error> {
        const ENTITY: &str = "role";
        Ok(Self {
            id: parse_id(raw.id, ENTITY, "id")?,
            name: required_text(raw.name, ENTITY, "name")?,
        })
    }
}

impl TryFrom<RawUser> for User {
    type Error = ValidationError;

    fn try_from(raw: RawUser) -> Result<Self, Self::Error> {
        const ENTITY: &str = "user";
        let email = required_text(raw.email, ENTITY, "email")?;
        let status = required_text(raw.status, ENTITY, "status")?;
        Ok(Self {
            id: parse_id(raw.id, ENTITY, "id")?,
            email: Email::parse(&email).map_err(|e| ValidationError::malformed(ENTITY, "email", e))?,
            password: raw.password.map(Credential::new),
            first_name: required_text(raw.first_name, ENTITY, "first_name")?,
            last_name: required_text(raw.last_name, ENTITY, "last_name")?,
            role: parse_optional_id(raw.role, ENTITY, "role")?,
            status: status
                .parse::<UserStatus>()
                .map_err(|e| ValidationError::malformed(ENTITY, "status", e))?,
        })
    }
}

impl TryFrom<RawStudent> for Student {
    type Error = ValidationError;

    fn try_from(raw: RawStudent) -> Result<Self, Self::Error> {
        const ENTITY: &str = "student";
        // Lookups match the stored column, so the slug is parsed untrimmed.
        let slug = required(raw.slug, ENTITY, "slug")?;
        if slug.trim().is_empty() {
            return Err(ValidationError::missing(ENTITY, "slug"));
        }
        Ok(Self {
            id: parse_id(raw.id, ENTITY, "id")?,
            user_id: parse_id(raw.user_id, ENTITY, "user_id")?,
            slug: Slug::parse(&slug).map_err(|e| ValidationError::malformed(ENTITY, "slug", e))?,
            bio: optional_text(raw.bio),
            avatar: parse_optional_id(raw.avatar, ENTITY, "avatar")?,
            audit: audit(raw.audit, ENTITY)?,
        })
    }
}

impl TryFrom<RawProject> for Project {
    type Error = ValidationError;

    fn try_from(raw: RawProject) -> Result<Self, Self::Error> {
        const ENTITY: &str = "project";
        Ok(Self {
            id: parse_id(raw.id, ENTITY, "id")?,
            title: required_text(raw.title, ENTITY, "title")?,
            description: optional_text(raw.description),
            student_id: parse_id(raw.student_id, ENTITY, "student_id")?,
            link: optional_text(raw.link)
                .map(|link| external_link(link, ENTITY, "link"))
                .transpose()?,
            audit: audit(raw.audit, ENTITY)?,
        })
    }
}

impl TryFrom<RawProjectImage> for ProjectImage {
    type Error = ValidationError;

    fn try_from(raw: RawProjectImage) -> Result<Self, Self::Error> {
        const ENTITY: &str = "project_image";
        Ok(Self {
            id: parse_id(raw.id, ENTITY, "id")?,
            project_id: parse_id(raw.project_id, ENTITY, "project_id")?,
            image: parse_id(raw.image, ENTITY, "image")?,
            order: required(raw.order, ENTITY, "order")?,
        })
    }
}

impl TryFrom<RawEvent> for Event {
    type Error = ValidationError;

    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        const ENTITY: &str = "event";
        let id: EventId = parse_id(raw.id, ENTITY, "id")?;
        let start_date = required_timestamp(raw.start_date, ENTITY, "start_date")?;
        let end_date = required_timestamp(raw.end_date, ENTITY, "end_date")?;
        if end_date < start_date {
            return Err(ValidationError::EventEndsBeforeStart {
                id: id.to_string(),
                start: start_date.to_rfc3339(),
                end: end_date.to_rfc3339(),
            });
        }
        let status = required_text(raw.status, ENTITY, "status")?;
        Ok(Self {
            id,
            title: required_text(raw.title, ENTITY, "title")?,
            description: optional_text(raw.description),
            start_date,
            end_date,
            location: optional_text(raw.location),
            status: status
                .parse::<EventStatus>()
                .map_err(|e| ValidationError::malformed(ENTITY, "status", e))?,
            audit: audit(raw.audit, ENTITY)?,
        })
    }
}

impl TryFrom<RawEventAdmin> for EventAdmin {
    type Error = ValidationError;

    fn try_from(raw: RawEventAdmin) -> Result<Self, Self::Error> {
        const ENTITY: &str = "event_admin";
        Ok(Self {
            id: parse_id(raw.id, ENTITY, "id")?,
            event_id: parse_id(raw.event_id, ENTITY, "event_id")?,
            admin_id: parse_id(raw.admin_id, ENTITY, "admin_id")?,
        })
    }
}

impl TryFrom<RawSocialNetwork> for SocialNetwork {
    type Error = ValidationError;

    fn try_from(raw: RawSocialNetwork) -> Result<Self, Self::Error> {
        const ENTITY: &str = "social_network";
        let platform = required_text(raw.platform, ENTITY, "platform")?;
        let link = required_text(raw.link, ENTITY, "link")?;
        Ok(Self {
            id: parse_id(raw.id, ENTITY, "id")?,
            platform: Platform::from_label(&platform),
            link: external_link(link, ENTITY, "link")?,
            student_id: parse_id(raw.student_id, ENTITY, "student_id")?,
            audit: audit(raw.audit, ENTITY)?,
        })
    }
}
