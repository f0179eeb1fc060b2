//! Validated entities of the Directus catalog.
//!
//! These mirror the backend collections one-to-one. They are only ever
//! built from [`records`](super::records) through `TryFrom`, so holding one
//! means every invariant of its collection was checked.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{
    Email, EventId, EventAdminId, EventStatus, FileId, Platform, ProjectId, ProjectImageId,
    RoleId, SocialNetworkId, Slug, StudentId, UserId, UserStatus,
};

/// Who created and last edited a record, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Audit {
    pub date_created: DateTime<Utc>,
    pub date_updated: Option<DateTime<Utc>>,
    pub user_created: Option<UserId>,
    pub user_updated: Option<UserId>,
}

/// Permission class assignable to a user (`directus_roles`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
}

/// Opaque account credential.
///
/// Directus only ever returns a masked value. It is kept so the shape
/// matches the collection, but it is redacted from `Debug` and never
/// serialized.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub(crate) const fn new(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Backend account (`directus_users`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    #[serde(skip)]
    pub password: Option<Credential>,
    pub first_name: String,
    pub last_name: String,
    /// `None` for accounts created without a role; they hold no permissions.
    pub role: Option<RoleId>,
    pub status: UserStatus,
}

impl User {
    /// Whether the account is active and its role exists in `roles`.
    ///
    /// A suspended, archived, invited or draft account has its role revoked.
    #[must_use]
    pub fn holds_role(&self, roles: &[Role]) -> bool {
        self.status.is_active()
            && self
                .role
                .is_some_and(|role| roles.iter().any(|known| known.id == role))
    }

    /// First and last name separated by a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Stored binary asset (`directus_files`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct File {
    pub id: FileId,
}

/// Student portfolio owner (`students`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    pub id: StudentId,
    pub user_id: UserId,
    pub slug: Slug,
    pub bio: Option<String>,
    pub avatar: Option<FileId>,
    pub audit: Audit,
}

/// Piece of student work (`projects`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: Option<String>,
    pub student_id: StudentId,
    pub link: Option<String>,
    pub audit: Audit,
}

/// Image attached to a project (`project_images`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectImage {
    pub id: ProjectImageId,
    pub project_id: ProjectId,
    pub image: FileId,
    pub order: i32,
}

/// Show, exhibition or talk (`events`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: Option<String>,
    pub status: EventStatus,
    pub audit: Audit,
}

impl Event {
    /// Whether the event starts and ends on the same calendar day (UTC).
    #[must_use]
    pub fn is_single_day(&self) -> bool {
        self.start_date.date_naive() == self.end_date.date_naive()
    }
}

/// Grants a user administrative rights over an event (`events_admins`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventAdmin {
    pub id: EventAdminId,
    pub event_id: EventId,
    pub admin_id: UserId,
}

/// Link from a student to one of their social profiles (`social_networks`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialNetwork {
    pub id: SocialNetworkId,
    pub platform: Platform,
    pub link: String,
    pub student_id: StudentId,
    pub audit: Audit,
}
