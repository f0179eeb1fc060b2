//! Denormalized display shapes.
//!
//! Each shape is assembled by an explicit `compose` function over validated
//! base entities. Composition checks that every related record actually
//! belongs to the parent it is attached to, so a mis-wired fetch surfaces
//! as a [`ValidationError::ForeignRecord`] instead of a wrong page.

use serde::Serialize;

use super::entities::{Event, EventAdmin, File, Project, ProjectImage, Role, SocialNetwork, Student, User};
use super::error::ValidationError;

fn foreign(
    entity: &'static str,
    id: impl ToString,
    parent: &'static str,
    parent_id: impl ToString,
) -> ValidationError {
    ValidationError::ForeignRecord {
        entity,
        id: id.to_string(),
        parent,
        parent_id: parent_id.to_string(),
    }
}

/// Sort project images for display.
///
/// Ascending by `order`. The sort is stable, so images sharing an `order`
/// keep the sequence the backend returned them in.
#[must_use]
pub fn ordered_images(mut images: Vec<ProjectImage>) -> Vec<ProjectImage> {
    images.sort_by_key(|image| image.order);
    images
}

// =============================================================================
// Students
// =============================================================================

/// Student with the name of its account and its avatar, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentSummary {
    pub student: Student,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<File>,
}

impl StudentSummary {
    /// Attach the student's account names.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ForeignRecord`] if `user` is not the
    /// student's account.
    pub fn compose(student: Student, user: &User) -> Result<Self, ValidationError> {
        if user.id != student.user_id {
            return Err(foreign("user", user.id, "student", student.id));
        }
        Ok(Self {
            avatar: student.avatar.map(|id| File { id }),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            student,
        })
    }

    /// First and last name separated by a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Student portfolio: the student, its names, its projects and its social
/// links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentWithRelations {
    pub student: Student,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<File>,
    pub projects: Vec<Project>,
    pub social_networks: Vec<SocialNetwork>,
}

impl StudentWithRelations {
    /// Assemble a portfolio. Projects and links keep the order given.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ForeignRecord`] if `user` is not the
    /// student's account, or a project or link belongs to another student.
    pub fn compose(
        student: Student,
        user: &User,
        projects: Vec<Project>,
        social_networks: Vec<SocialNetwork>,
    ) -> Result<Self, ValidationError> {
        if let Some(project) = projects.iter().find(|p| p.student_id != student.id) {
            return Err(foreign("project", project.id, "student", student.id));
        }
        if let Some(link) = social_networks.iter().find(|s| s.student_id != student.id) {
            return Err(foreign("social_network", link.id, "student", student.id));
        }

        let summary = StudentSummary::compose(student, user)?;
        Ok(Self {
            student: summary.student,
            first_name: summary.first_name,
            last_name: summary.last_name,
            avatar: summary.avatar,
            projects,
            social_networks,
        })
    }

    /// First and last name separated by a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// =============================================================================
// Projects
// =============================================================================

/// Project with its images in display order and, when resolved, its student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectWithRelations {
    pub project: Project,
    pub student: Option<StudentWithRelations>,
    pub images: Vec<ProjectImage>,
}

impl ProjectWithRelations {
    /// Assemble a project page. Images are put in display order.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ForeignRecord`] if an image belongs to
    /// another project or `student` is not the project's author.
    pub fn compose(
        project: Project,
        student: Option<StudentWithRelations>,
        images: Vec<ProjectImage>,
    ) -> Result<Self, ValidationError> {
        if let Some(image) = images.iter().find(|i| i.project_id != project.id) {
            return Err(foreign("project_image", image.id, "project", project.id));
        }
        if let Some(author) = student.as_ref()
            && author.student.id != project.student_id
        {
            return Err(foreign("project", project.id, "student", author.student.id));
        }
        Ok(Self {
            project,
            student,
            images: ordered_images(images),
        })
    }

    /// First image in display order.
    #[must_use]
    pub fn cover(&self) -> Option<&ProjectImage> {
        self.images.first()
    }
}

// =============================================================================
// Events
// =============================================================================

/// Event with the accounts administering it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventWithRelations {
    pub event: Event,
    pub admins: Vec<User>,
}

impl EventWithRelations {
    /// Assemble an event page.
    ///
    /// Admins follow the order of `grants`. Users without a grant, and users
    /// whose role is missing, unknown to `roles`, or revoked, are left out.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ForeignRecord`] if a grant belongs to
    /// another event.
    pub fn compose(
        event: Event,
        grants: &[EventAdmin],
        users: Vec<User>,
        roles: &[Role],
    ) -> Result<Self, ValidationError> {
        if let Some(grant) = grants.iter().find(|g| g.event_id != event.id) {
            return Err(foreign("event_admin", grant.id, "event", event.id));
        }

        let mut admins: Vec<User> = Vec::with_capacity(grants.len());
        for grant in grants {
            if admins.iter().any(|admin| admin.id == grant.admin_id) {
                continue;
            }
            if let Some(user) = users
                .iter()
                .find(|user| user.id == grant.admin_id && user.holds_role(roles))
            {
                admins.push(user.clone());
            }
        }

        Ok(Self { event, admins })
    }
}
