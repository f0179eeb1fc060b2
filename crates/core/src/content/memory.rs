//! In-memory [`ContentSource`] for tests and local previews.

use futures::FutureExt;
use futures::future::BoxFuture;

use super::error::FetchError;
use super::records::{
    RawEvent, RawEventAdmin, RawProject, RawProjectImage, RawRole, RawSocialNetwork, RawStudent,
    RawUser,
};
use super::source::{ContentSource, FetchResult};
use crate::types::{EventId, ProjectId, Slug, StudentId, UserId};

/// A catalog held in memory.
///
/// Records are stored raw, so malformed data can be staged to exercise
/// validation. Lists keep insertion order, which stands in for the
/// backend's order. An offline catalog fails every read with a
/// [`FetchError`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryContent {
    pub roles: Vec<RawRole>,
    pub users: Vec<RawUser>,
    pub students: Vec<RawStudent>,
    pub projects: Vec<RawProject>,
    pub project_images: Vec<RawProjectImage>,
    pub events: Vec<RawEvent>,
    pub event_admins: Vec<RawEventAdmin>,
    pub social_networks: Vec<RawSocialNetwork>,
    offline: bool,
}

impl InMemoryContent {
    /// An empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog whose every read fails as if the backend were down.
    #[must_use]
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    fn read<T: Send + 'static>(&self, f: impl FnOnce(&Self) -> T) -> BoxFuture<'_, FetchResult<T>> {
        let result = if self.offline {
            Err(FetchError::new("content backend offline"))
        } else {
            Ok(f(self))
        };
        futures::future::ready(result).boxed()
    }
}

/// Whether a raw `id` column holds `id`.
fn same_id(raw: Option<&String>, id: impl ToString) -> bool {
    raw.is_some_and(|raw| raw.eq_ignore_ascii_case(&id.to_string()))
}

impl ContentSource for InMemoryContent {
    fn ping(&self) -> BoxFuture<'_, FetchResult<()>> {
        self.read(|_| ())
    }

    fn roles(&self) -> BoxFuture<'_, FetchResult<Vec<RawRole>>> {
        self.read(|c| c.roles.clone())
    }

    fn user(&self, id: UserId) -> BoxFuture<'_, FetchResult<Option<RawUser>>> {
        self.read(move |c| c.users.iter().find(|u| same_id(u.id.as_ref(), id)).cloned())
    }

    fn users<'a>(&'a self, ids: &'a [UserId]) -> BoxFuture<'a, FetchResult<Vec<RawUser>>> {
        self.read(move |c| {
            c.users
                .iter()
                .filter(|u| ids.iter().any(|id| same_id(u.id.as_ref(), id)))
                .cloned()
                .collect()
        })
    }

    fn student(&self, id: StudentId) -> BoxFuture<'_, FetchResult<Option<RawStudent>>> {
        self.read(move |c| {
            c.students
                .iter()
                .find(|s| same_id(s.id.as_ref(), id))
                .cloned()
        })
    }

    fn students_by_slug<'a>(
        &'a self,
        slug: &'a Slug,
    ) -> BoxFuture<'a, FetchResult<Vec<RawStudent>>> {
        self.read(move |c| {
            c.students
                .iter()
                .filter(|s| s.slug.as_deref() == Some(slug.as_str()))
                .cloned()
                .collect()
        })
    }

    fn students(&self) -> BoxFuture<'_, FetchResult<Vec<RawStudent>>> {
        self.read(|c| c.students.clone())
    }

    fn project(&self, id: ProjectId) -> BoxFuture<'_, FetchResult<Option<RawProject>>> {
        self.read(move |c| {
            c.projects
                .iter()
                .find(|p| same_id(p.id.as_ref(), id))
                .cloned()
        })
    }

    fn projects_by_student(
        &self,
        student: StudentId,
    ) -> BoxFuture<'_, FetchResult<Vec<RawProject>>> {
        self.read(move |c| {
            c.projects
                .iter()
                .filter(|p| same_id(p.student_id.as_ref(), student))
                .cloned()
                .collect()
        })
    }

    fn recent_projects(&self, limit: usize) -> BoxFuture<'_, FetchResult<Vec<RawProject>>> {
        self.read(move |c| {
            let mut projects = c.projects.clone();
            // ISO timestamps sort lexically; undated records go last.
            projects.sort_by(|a, b| b.audit.date_created.cmp(&a.audit.date_created));
            projects.truncate(limit);
            projects
        })
    }

    fn project_images(
        &self,
        project: ProjectId,
    ) -> BoxFuture<'_, FetchResult<Vec<RawProjectImage>>> {
        self.read(move |c| {
            c.project_images
                .iter()
                .filter(|i| same_id(i.project_id.as_ref(), project))
                .cloned()
                .collect()
        })
    }

    fn social_networks(
        &self,
        student: StudentId,
    ) -> BoxFuture<'_, FetchResult<Vec<RawSocialNetwork>>> {
        self.read(move |c| {
            c.social_networks
                .iter()
                .filter(|s| same_id(s.student_id.as_ref(), student))
                .cloned()
                .collect()
        })
    }

    fn event(&self, id: EventId) -> BoxFuture<'_, FetchResult<Option<RawEvent>>> {
        self.read(move |c| c.events.iter().find(|e| same_id(e.id.as_ref(), id)).cloned())
    }

    fn events(&self) -> BoxFuture<'_, FetchResult<Vec<RawEvent>>> {
        self.read(|c| c.events.clone())
    }

    fn event_admins(&self, event: EventId) -> BoxFuture<'_, FetchResult<Vec<RawEventAdmin>>> {
        self.read(move |c| {
            c.event_admins
                .iter()
                .filter(|a| same_id(a.event_id.as_ref(), event))
                .cloned()
                .collect()
        })
    }
}
