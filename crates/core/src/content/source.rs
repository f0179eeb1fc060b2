//! Read-only repository interface over the content backend.

use futures::future::BoxFuture;

use super::error::FetchError;
use super::records::{
    RawEvent, RawEventAdmin, RawProject, RawProjectImage, RawRole, RawSocialNetwork, RawStudent,
    RawUser,
};
use crate::types::{EventId, ProjectId, Slug, StudentId, UserId};

/// Result of a single backend read.
pub type FetchResult<T> = Result<T, FetchError>;

/// Read-only access to the content catalog.
///
/// Implementations return raw records exactly as the backend stores them;
/// validation and composition happen in the [`resolve`](super::resolve)
/// functions. `Ok(None)` and empty lists mean "not present", `Err` means
/// the backend could not answer.
///
/// List methods return records in the backend's order, which is expected to
/// be stable between calls.
///
/// The trait is object safe so the site can hold an `Arc<dyn ContentSource>`
/// and tests can substitute [`InMemoryContent`](super::InMemoryContent).
pub trait ContentSource: Send + Sync {
    /// Check that the backend is reachable.
    fn ping(&self) -> BoxFuture<'_, FetchResult<()>>;

    /// All roles.
    fn roles(&self) -> BoxFuture<'_, FetchResult<Vec<RawRole>>>;

    /// A single account.
    fn user(&self, id: UserId) -> BoxFuture<'_, FetchResult<Option<RawUser>>>;

    /// The accounts among `ids` that exist.
    fn users<'a>(&'a self, ids: &'a [UserId]) -> BoxFuture<'a, FetchResult<Vec<RawUser>>>;

    /// A single student.
    fn student(&self, id: StudentId) -> BoxFuture<'_, FetchResult<Option<RawStudent>>>;

    /// Every student whose slug equals `slug`. More than one means the
    /// uniqueness constraint was broken upstream.
    fn students_by_slug<'a>(&'a self, slug: &'a Slug)
    -> BoxFuture<'a, FetchResult<Vec<RawStudent>>>;

    /// All students.
    fn students(&self) -> BoxFuture<'_, FetchResult<Vec<RawStudent>>>;

    /// A single project.
    fn project(&self, id: ProjectId) -> BoxFuture<'_, FetchResult<Option<RawProject>>>;

    /// Projects of one student.
    fn projects_by_student(
        &self,
        student: StudentId,
    ) -> BoxFuture<'_, FetchResult<Vec<RawProject>>>;

    /// The `limit` most recently created projects, newest first.
    fn recent_projects(&self, limit: usize) -> BoxFuture<'_, FetchResult<Vec<RawProject>>>;

    /// Images of one project, in backend order.
    fn project_images(&self, project: ProjectId)
    -> BoxFuture<'_, FetchResult<Vec<RawProjectImage>>>;

    /// Social links of one student.
    fn social_networks(
        &self,
        student: StudentId,
    ) -> BoxFuture<'_, FetchResult<Vec<RawSocialNetwork>>>;

    /// A single event.
    fn event(&self, id: EventId) -> BoxFuture<'_, FetchResult<Option<RawEvent>>>;

    /// All events.
    fn events(&self) -> BoxFuture<'_, FetchResult<Vec<RawEvent>>>;

    /// Admin grants of one event.
    fn event_admins(&self, event: EventId) -> BoxFuture<'_, FetchResult<Vec<RawEventAdmin>>>;
}
