//! Content model and fetch contract.
//!
//! - [`records`]: raw backend rows, every field optional.
//! - [`entities`]: validated entities, built from records via `TryFrom`.
//! - [`relations`]: denormalized display shapes and their `compose` functions.
//! - [`source`]: the [`ContentSource`] repository trait.
//! - [`resolve`]: fetch, validate and compose one page's worth of content.

pub mod entities;
pub mod error;
pub mod memory;
pub mod records;
pub mod relations;
pub mod resolve;
pub mod source;

#[cfg(test)]
pub(crate) mod fixtures;

pub use entities::{
    Audit, Credential, Event, EventAdmin, File, Project, ProjectImage, Role, SocialNetwork,
    Student, User,
};
pub use error::{FetchError, ResolveError, ValidationError};
pub use memory::InMemoryContent;
pub use records::{
    RawAudit, RawEvent, RawEventAdmin, RawProject, RawProjectImage, RawRole, RawSocialNetwork,
    RawStudent, RawUser,
};
pub use relations::{
    EventWithRelations, ProjectWithRelations, StudentSummary, StudentWithRelations,
    ordered_images,
};
pub use resolve::{
    Listing, StudentKey, list_events, list_students, recent_projects, resolve_event,
    resolve_project, resolve_student,
};
pub use source::{ContentSource, FetchResult};
