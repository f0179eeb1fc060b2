//! Shared test catalog.

#![allow(clippy::unwrap_used)]

use super::entities::{Event, EventAdmin, Project, ProjectImage, Role, Student, User};
use super::memory::InMemoryContent;
use super::records::{
    RawAudit, RawEvent, RawEventAdmin, RawProject, RawProjectImage, RawRole, RawSocialNetwork,
    RawStudent, RawUser,
};
use crate::types::UserStatus;

pub const ROLE_ADMIN: &str = "3e1d5c7b-9a2f-4d6e-8b0c-2f4a6e8c0d15";
pub const ROLE_STUDENT: &str = "5a7c9e1b-3d5f-4a8c-9e2b-4d6f8a0c2e37";

pub const USER_EMMA: &str = "1c7e9a3b-5d2f-4b8e-9a6c-0e4d2f8b1a73";
pub const USER_THOMAS: &str = "2d8f0b4c-6e3a-4c9f-8b7d-1f5e3a9c2b84";
pub const USER_ADMIN: &str = "6b9d1f3a-5c7e-4e0b-a2d4-8f1a3c5e7b96";
pub const USER_SUSPENDED: &str = "7c0e2a4b-6d8f-4f1c-b3e5-9a2b4d6f8c07";
pub const USER_NO_ROLE: &str = "8d1f3b5c-7e9a-4a2d-84f6-0b3c5e7a9d18";

pub const FILE_AVATAR: &str = "0f2b4d6e-8a1c-4e3f-95b7-d9f1a3c5e7b9";

pub const STUDENT_EMMA: &str = "9d3b8c1e-2f4a-4e6b-8c0d-7a1f3e5b9c21";
pub const STUDENT_THOMAS: &str = "4b6d8f0a-2c4e-4a6b-8d0f-3e5a7c9b1d43";
pub const STUDENT_DUPLICATE: &str = "c5e7a9b1-3d5f-4b7c-9e1a-6f8b0d2c4e65";

pub const PROJECT_A: &str = "7f2e4a6c-8b0d-4f1e-a3c5-9d7b1e3f5a27";
pub const PROJECT_B: &str = "a1c3e5f7-9b2d-4c4e-86a8-0b2d4f6a8c19";
pub const PROJECT_C: &str = "b2d4f6a8-0c3e-4d5f-97b9-1c3e5a7b9d20";
pub const PROJECT_UNKNOWN: &str = "e9f1a3b5-7c9d-4e1f-a3b5-7c9d1e3f5a99";

pub const IMAGE_A: &str = "2a4c6e8f-0b1d-4e3f-9a5c-7e9b1d3f5a71";
pub const IMAGE_B: &str = "3b5d7f9a-1c2e-4f4a-8b6d-8f0a2c4e6b82";
pub const IMAGE_C: &str = "4c6e8a0b-2d3f-4a5b-9c7e-9a1b3d5f7c93";

pub const SOCIAL_EMMA: &str = "d6f8b0c2-4e6a-4c8d-a0f2-7b9d1f3a5c76";

pub const EVENT_SHOW: &str = "5b0c2d6e-8f0a-4c51-9a63-1d0e4b7f2a90";
pub const EVENT_TALK: &str = "6c1d3e7f-9a1b-4d62-8b74-2e1f5c8a3b01";
pub const EVENT_BACKWARDS: &str = "7d2e4f8a-0b2c-4e73-9c85-3f2a6d9b4c12";

pub const GRANT_A: &str = "8e3f5a9b-1c3d-4f84-ad96-4a3b7e0c5d23";
pub const GRANT_B: &str = "9f4a6b0c-2d4e-4a95-be07-5b4c8f1d6e34";
pub const GRANT_C: &str = "a05b7c1d-3e5f-4ba6-8f18-6c5d9a2e7f45";
pub const GRANT_D: &str = "b16c8d2e-4f6a-4cb7-9a29-7d6e0b3f8a56";
pub const GRANT_E: &str = "c27d9e3f-5a7b-4dc8-8b3a-8e7f1c4a9b67";

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn created(at: &str) -> RawAudit {
    RawAudit {
        date_created: text(at),
        ..RawAudit::default()
    }
}

// =============================================================================
// Raw Records
// =============================================================================

pub fn raw_role(id: &str, name: &str) -> RawRole {
    RawRole {
        id: text(id),
        name: text(name),
    }
}

pub fn raw_user(
    id: &str,
    first: &str,
    last: &str,
    role: Option<&str>,
    status: UserStatus,
) -> RawUser {
    RawUser {
        id: text(id),
        email: Some(format!("{first}.{last}@modart-reims.fr").to_lowercase()),
        password: text("**********"),
        first_name: text(first),
        last_name: text(last),
        role: role.map(str::to_string),
        status: Some(status.to_string()),
    }
}

pub fn raw_student(id: &str, user: &str, slug: &str, avatar: Option<&str>) -> RawStudent {
    RawStudent {
        id: text(id),
        user_id: text(user),
        slug: text(slug),
        bio: text("Étudiante en deuxième année de stylisme."),
        avatar: avatar.map(str::to_string),
        audit: created("2024-01-10T09:00:00Z"),
    }
}

pub fn raw_project(id: &str, student: &str, title: &str, created_at: &str) -> RawProject {
    RawProject {
        id: text(id),
        title: text(title),
        description: None,
        student_id: text(student),
        link: None,
        audit: created(created_at),
    }
}

pub fn raw_image(id: &str, project: &str, order: i32) -> RawProjectImage {
    RawProjectImage {
        id: text(id),
        project_id: text(project),
        image: text(FILE_AVATAR),
        order: Some(order),
    }
}

pub fn raw_event(id: &str, title: &str, start: &str, end: &str) -> RawEvent {
    RawEvent {
        id: text(id),
        title: text(title),
        description: None,
        start_date: text(start),
        end_date: text(end),
        location: text("Grand Palais, Reims"),
        status: text("upcoming"),
        audit: created("2024-01-10T09:00:00Z"),
    }
}

pub fn raw_grant(id: &str, event: &str, user: &str) -> RawEventAdmin {
    RawEventAdmin {
        id: text(id),
        event_id: text(event),
        admin_id: text(user),
    }
}

pub fn raw_social(id: &str, student: &str, platform: &str, link: &str) -> RawSocialNetwork {
    RawSocialNetwork {
        id: text(id),
        platform: text(platform),
        link: text(link),
        student_id: text(student),
        audit: created("2024-01-10T09:00:00Z"),
    }
}

// =============================================================================
// Validated Entities
// =============================================================================

pub fn role(id: &str, name: &str) -> Role {
    Role::try_from(raw_role(id, name)).unwrap()
}

pub fn user(id: &str, first: &str, last: &str, role: Option<&str>, status: UserStatus) -> User {
    User::try_from(raw_user(id, first, last, role, status)).unwrap()
}

pub fn student(id: &str, user: &str, slug: &str, avatar: Option<&str>) -> Student {
    Student::try_from(raw_student(id, user, slug, avatar)).unwrap()
}

pub fn project(id: &str, student: &str, title: &str) -> Project {
    Project::try_from(raw_project(id, student, title, "2024-01-15T10:00:00Z")).unwrap()
}

pub fn image(id: &str, project: &str, order: i32) -> ProjectImage {
    ProjectImage::try_from(raw_image(id, project, order)).unwrap()
}

pub fn event(id: &str, start: &str, end: &str) -> Event {
    Event::try_from(raw_event(id, "Défilé de fin d'année", start, end)).unwrap()
}

pub fn grant(id: &str, event: &str, user: &str) -> EventAdmin {
    EventAdmin::try_from(raw_grant(id, event, user)).unwrap()
}

/// Two students, three projects, three events (one ending before it starts)
/// and a mix of live and revoked event admins.
pub fn catalog() -> InMemoryContent {
    let mut catalog = InMemoryContent::new();
    catalog.roles = vec![
        raw_role(ROLE_ADMIN, "Administrator"),
        raw_role(ROLE_STUDENT, "Student"),
    ];
    catalog.users = vec![
        raw_user(USER_EMMA, "Emma", "Laurent", Some(ROLE_STUDENT), UserStatus::Active),
        raw_user(USER_THOMAS, "Thomas", "Dubois", Some(ROLE_STUDENT), UserStatus::Active),
        raw_user(USER_ADMIN, "Claire", "Martin", Some(ROLE_ADMIN), UserStatus::Active),
        raw_user(USER_SUSPENDED, "Paul", "Roux", Some(ROLE_ADMIN), UserStatus::Suspended),
        raw_user(USER_NO_ROLE, "Lea", "Blanc", None, UserStatus::Active),
    ];
    catalog.students = vec![
        raw_student(STUDENT_EMMA, USER_EMMA, "emma-laurent", Some(FILE_AVATAR)),
        raw_student(STUDENT_THOMAS, USER_THOMAS, "thomas-dubois", None),
    ];
    catalog.projects = vec![
        raw_project(PROJECT_A, STUDENT_EMMA, "Collection Printemps", "2024-01-15T10:00:00Z"),
        raw_project(PROJECT_C, STUDENT_EMMA, "Mode Durable", "2024-02-20T10:00:00Z"),
        raw_project(PROJECT_B, STUDENT_THOMAS, "Projet Haute Couture", "2024-03-10T10:00:00Z"),
    ];
    catalog.project_images = vec![
        raw_image(IMAGE_A, PROJECT_A, 2),
        raw_image(IMAGE_B, PROJECT_A, 1),
        raw_image(IMAGE_C, PROJECT_A, 1),
    ];
    catalog.social_networks = vec![raw_social(
        SOCIAL_EMMA,
        STUDENT_EMMA,
        "Instagram",
        "https://instagram.com/emma.laurent",
    )];
    catalog.events = vec![
        raw_event(
            EVENT_SHOW,
            "Défilé de fin d'année",
            "2024-06-15T18:00:00Z",
            "2024-06-15T22:00:00Z",
        ),
        raw_event(
            EVENT_TALK,
            "Conférence Mode Durable",
            "2024-05-20T14:00:00Z",
            "2024-05-20T16:00:00Z",
        ),
        raw_event(
            EVENT_BACKWARDS,
            "Exposition Textile",
            "2024-09-10T18:00:00Z",
            "2024-09-01T18:00:00Z",
        ),
    ];
    catalog.event_admins = vec![
        raw_grant(GRANT_A, EVENT_SHOW, USER_ADMIN),
        raw_grant(GRANT_B, EVENT_SHOW, USER_SUSPENDED),
        raw_grant(GRANT_C, EVENT_SHOW, USER_NO_ROLE),
    ];
    catalog
}
