//! Fetch-and-denormalize operations.
//!
//! Each resolver reads raw records from a [`ContentSource`], validates
//! them, and composes the display shape. Independent reads run
//! concurrently. Failures are scoped to the entity being resolved.

use std::collections::{HashMap, HashSet};

use futures::future::{self, BoxFuture, FutureExt, TryFutureExt};
use serde::Serialize;

use super::entities::{Event, EventAdmin, Project, ProjectImage, Role, SocialNetwork, Student, User};
use super::error::{FetchError, ResolveError, ValidationError};
use super::relations::{
    EventWithRelations, ProjectWithRelations, StudentSummary, StudentWithRelations,
};
use super::source::{ContentSource, FetchResult};
use crate::types::{EventId, ProjectId, Slug, SlugError, StudentId, UserId};

/// How a student is addressed: by ID or by URL slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StudentKey {
    Id(StudentId),
    Slug(Slug),
}

impl StudentKey {
    /// Interpret a path segment: a UUID is an ID, anything else must be a
    /// valid slug.
    ///
    /// # Errors
    ///
    /// Returns the slug error when the segment is neither.
    pub fn parse(raw: &str) -> Result<Self, SlugError> {
        if is_hyphenated_uuid(raw)
            && let Ok(id) = raw.parse::<StudentId>()
        {
            return Ok(Self::Id(id));
        }
        Slug::parse(raw).map(Self::Slug)
    }
}

/// Only the 8-4-4-4-12 form counts as an ID. A bare 32-digit hex string
/// is a valid slug.
fn is_hyphenated_uuid(raw: &str) -> bool {
    raw.len() == 36
        && [8, 13, 18, 23]
            .iter()
            .all(|&i| raw.as_bytes().get(i) == Some(&b'-'))
}

impl std::fmt::Display for StudentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Slug(slug) => write!(f, "{slug}"),
        }
    }
}

/// Records that validated, plus the reasons the others did not.
///
/// One malformed record in a listing is reported here without hiding its
/// siblings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing<T> {
    pub items: Vec<T>,
    #[serde(skip)]
    pub rejected: Vec<ValidationError>,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

/// Validate every record, failing on the first malformed one.
fn validate_all<R, T>(raws: Vec<R>) -> Result<Vec<T>, ValidationError>
where
    T: TryFrom<R, Error = ValidationError>,
{
    raws.into_iter().map(T::try_from).collect()
}

/// Validate every record, setting malformed ones aside.
fn validate_each<R, T>(raws: Vec<R>, rejected: &mut Vec<ValidationError>) -> Vec<T>
where
    T: TryFrom<R, Error = ValidationError>,
{
    raws.into_iter()
        .filter_map(|raw| T::try_from(raw).map_err(|e| rejected.push(e)).ok())
        .collect()
}

// =============================================================================
// Students
// =============================================================================

/// Resolve a student portfolio.
///
/// Projects and social links are returned in backend order.
///
/// # Errors
///
/// - [`ResolveError::NotFound`] if no student has this ID or slug.
/// - [`ResolveError::Validation`] if a record is malformed, the student's
///   account is missing, or the slug is shared with another student.
/// - [`ResolveError::Transient`] if the backend could not be reached.
pub async fn resolve_student(
    source: &dyn ContentSource,
    key: &StudentKey,
) -> Result<StudentWithRelations, ResolveError> {
    let raw = match key {
        StudentKey::Id(id) => source
            .student(*id)
            .await?
            .ok_or_else(|| ResolveError::not_found("student", key))?,
        StudentKey::Slug(slug) => {
            let mut found = source.students_by_slug(slug).await?;
            match found.len() {
                0 => return Err(ResolveError::not_found("student", key)),
                1 => found
                    .pop()
                    .ok_or_else(|| ResolveError::not_found("student", key))?,
                count => {
                    return Err(ValidationError::DuplicateSlug {
                        slug: slug.to_string(),
                        count,
                    }
                    .into());
                }
            }
        }
    };
    let student = Student::try_from(raw)?;

    // A lookup by slug already proved the slug unique.
    let namesakes: BoxFuture<'_, FetchResult<usize>> = match key {
        StudentKey::Id(_) => source
            .students_by_slug(&student.slug)
            .map_ok(|found| found.len())
            .boxed(),
        StudentKey::Slug(_) => future::ready(Ok(1)).boxed(),
    };

    let (user, projects, social_networks, namesakes) = futures::try_join!(
        source.user(student.user_id),
        source.projects_by_student(student.id),
        source.social_networks(student.id),
        namesakes,
    )?;

    if namesakes > 1 {
        return Err(ValidationError::DuplicateSlug {
            slug: student.slug.to_string(),
            count: namesakes,
        }
        .into());
    }

    let user = User::try_from(user.ok_or_else(|| dangling_user(&student))?)?;
    let projects: Vec<Project> = validate_all(projects)?;
    let social_networks: Vec<SocialNetwork> = validate_all(social_networks)?;

    Ok(StudentWithRelations::compose(
        student,
        &user,
        projects,
        social_networks,
    )?)
}

fn dangling_user(student: &Student) -> ValidationError {
    ValidationError::DanglingReference {
        entity: "student",
        id: student.id.to_string(),
        target: "user",
        target_id: student.user_id.to_string(),
    }
}

/// List every student with its account names, in backend order.
///
/// Students that fail validation, share a slug, or reference a missing or
/// malformed account are left out and reported in
/// [`Listing::rejected`].
///
/// # Errors
///
/// Returns a [`FetchError`] if the backend could not be reached.
pub async fn list_students(
    source: &dyn ContentSource,
) -> Result<Listing<StudentSummary>, FetchError> {
    let mut rejected = Vec::new();
    let students: Vec<Student> = validate_each(source.students().await?, &mut rejected);

    let mut slug_counts: HashMap<&Slug, usize> = HashMap::new();
    for student in &students {
        *slug_counts.entry(&student.slug).or_insert(0) += 1;
    }
    let mut duplicates: Vec<(&Slug, usize)> = slug_counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .collect();
    duplicates.sort();
    for (slug, count) in &duplicates {
        rejected.push(ValidationError::DuplicateSlug {
            slug: slug.to_string(),
            count: *count,
        });
    }
    let duplicate_slugs: Vec<Slug> = duplicates.into_iter().map(|(s, _)| s.clone()).collect();
    let students: Vec<Student> = students
        .into_iter()
        .filter(|s| !duplicate_slugs.contains(&s.slug))
        .collect();

    let user_ids: Vec<UserId> = students.iter().map(|s| s.user_id).collect();
    let raw_users = source.users(&user_ids).await?;
    // Accounts that exist but failed validation are already reported.
    let returned: HashSet<UserId> = raw_users
        .iter()
        .filter_map(|u| u.id.as_deref()?.parse().ok())
        .collect();
    let users: Vec<User> = validate_each(raw_users, &mut rejected);

    let mut items = Vec::with_capacity(students.len());
    for student in students {
        let Some(user) = users.iter().find(|u| u.id == student.user_id) else {
            if !returned.contains(&student.user_id) {
                rejected.push(dangling_user(&student));
            }
            continue;
        };
        match StudentSummary::compose(student, user) {
            Ok(summary) => items.push(summary),
            Err(e) => rejected.push(e),
        }
    }

    Ok(Listing { items, rejected })
}

// =============================================================================
// Projects
// =============================================================================

/// Attach images and the resolved author to a validated project.
async fn complete_project(
    source: &dyn ContentSource,
    project: Project,
) -> Result<ProjectWithRelations, ResolveError> {
    let author = StudentKey::Id(project.student_id);
    let (images, student) = futures::try_join!(
        source.project_images(project.id).err_into::<ResolveError>(),
        resolve_student(source, &author),
    )
    .map_err(|e| match e {
        ResolveError::NotFound { .. } => ResolveError::Validation(ValidationError::DanglingReference {
            entity: "project",
            id: project.id.to_string(),
            target: "student",
            target_id: project.student_id.to_string(),
        }),
        other => other,
    })?;

    let images: Vec<ProjectImage> = validate_all(images)?;
    Ok(ProjectWithRelations::compose(project, Some(student), images)?)
}

/// Resolve a project page.
///
/// Images are ordered by `order` ascending; ties keep backend order.
///
/// # Errors
///
/// - [`ResolveError::NotFound`] if no project has this ID.
/// - [`ResolveError::Validation`] if a record is malformed or the author
///   is missing.
/// - [`ResolveError::Transient`] if the backend could not be reached.
pub async fn resolve_project(
    source: &dyn ContentSource,
    id: ProjectId,
) -> Result<ProjectWithRelations, ResolveError> {
    let raw = source
        .project(id)
        .await?
        .ok_or_else(|| ResolveError::not_found("project", id))?;
    let project = Project::try_from(raw)?;
    complete_project(source, project).await
}

/// The `limit` newest projects, fully resolved, for the landing page.
///
/// Projects that fail to resolve are reported in [`Listing::rejected`].
///
/// # Errors
///
/// Returns a [`FetchError`] if the backend could not be reached.
pub async fn recent_projects(
    source: &dyn ContentSource,
    limit: usize,
) -> Result<Listing<ProjectWithRelations>, FetchError> {
    let mut rejected = Vec::new();
    let projects: Vec<Project> = validate_each(source.recent_projects(limit).await?, &mut rejected);

    let ids: Vec<ProjectId> = projects.iter().map(|p| p.id).collect();
    let resolved =
        future::join_all(projects.into_iter().map(|p| complete_project(source, p))).await;

    let mut items = Vec::with_capacity(resolved.len());
    for (id, result) in ids.into_iter().zip(resolved) {
        match result {
            Ok(project) => items.push(project),
            Err(ResolveError::Validation(e)) => rejected.push(e),
            Err(ResolveError::Transient(e)) => return Err(e),
            Err(ResolveError::NotFound { entity, key }) => {
                rejected.push(ValidationError::DanglingReference {
                    entity: "project",
                    id: id.to_string(),
                    target: entity,
                    target_id: key,
                });
            }
        }
    }

    Ok(Listing { items, rejected })
}

// =============================================================================
// Events
// =============================================================================

/// Resolve an event page.
///
/// Admins are limited to active accounts whose role exists.
///
/// # Errors
///
/// - [`ResolveError::NotFound`] if no event has this ID.
/// - [`ResolveError::Validation`] if a record is malformed, including an
///   event that ends before it starts.
/// - [`ResolveError::Transient`] if the backend could not be reached.
pub async fn resolve_event(
    source: &dyn ContentSource,
    id: EventId,
) -> Result<EventWithRelations, ResolveError> {
    let raw = source
        .event(id)
        .await?
        .ok_or_else(|| ResolveError::not_found("event", id))?;
    let event = Event::try_from(raw)?;

    let (grants, roles) = futures::try_join!(source.event_admins(event.id), source.roles())?;
    let grants: Vec<EventAdmin> = validate_all(grants)?;
    let roles: Vec<Role> = validate_all(roles)?;

    let admin_ids: Vec<UserId> = grants.iter().map(|g| g.admin_id).collect();
    let users: Vec<User> = if admin_ids.is_empty() {
        Vec::new()
    } else {
        validate_all(source.users(&admin_ids).await?)?
    };

    Ok(EventWithRelations::compose(event, &grants, users, &roles)?)
}

/// Every event, ordered by start date.
///
/// Malformed events are reported in [`Listing::rejected`].
///
/// # Errors
///
/// Returns a [`FetchError`] if the backend could not be reached.
pub async fn list_events(source: &dyn ContentSource) -> Result<Listing<Event>, FetchError> {
    let mut rejected = Vec::new();
    let mut items: Vec<Event> = validate_each(source.events().await?, &mut rejected);
    items.sort_by_key(|event| event.start_date);
    Ok(Listing { items, rejected })
}
