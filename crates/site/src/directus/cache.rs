//! Cache types for Directus responses.

use modart_core::content::{
    RawEvent, RawEventAdmin, RawProject, RawProjectImage, RawRole, RawSocialNetwork, RawStudent,
    RawUser,
};
use modart_core::types::{EventId, ProjectId, Slug, StudentId, UserId};

/// Cache key, one variant per read.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Roles,
    User(UserId),
    Users(Vec<UserId>),
    Student(StudentId),
    StudentsBySlug(Slug),
    Students,
    Project(ProjectId),
    ProjectsByStudent(StudentId),
    RecentProjects(usize),
    ProjectImages(ProjectId),
    SocialNetworks(StudentId),
    Event(EventId),
    Events,
    EventAdmins(EventId),
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Roles(Vec<RawRole>),
    User(Option<RawUser>),
    Users(Vec<RawUser>),
    Student(Option<RawStudent>),
    Students(Vec<RawStudent>),
    Project(Option<RawProject>),
    Projects(Vec<RawProject>),
    ProjectImages(Vec<RawProjectImage>),
    SocialNetworks(Vec<RawSocialNetwork>),
    Event(Option<RawEvent>),
    Events(Vec<RawEvent>),
    EventAdmins(Vec<RawEventAdmin>),
}

/// A response type that has its own [`CacheValue`] variant.
pub trait Cached: Sized {
    fn into_value(self) -> CacheValue;
    fn from_value(value: CacheValue) -> Option<Self>;
}

macro_rules! cached {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Cached for $ty {
                fn into_value(self) -> CacheValue {
                    CacheValue::$variant(self)
                }

                fn from_value(value: CacheValue) -> Option<Self> {
                    match value {
                        CacheValue::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )*
    };
}

cached! {
    Vec<RawRole> => Roles,
    Option<RawUser> => User,
    Vec<RawUser> => Users,
    Option<RawStudent> => Student,
    Vec<RawStudent> => Students,
    Option<RawProject> => Project,
    Vec<RawProject> => Projects,
    Vec<RawProjectImage> => ProjectImages,
    Vec<RawSocialNetwork> => SocialNetworks,
    Option<RawEvent> => Event,
    Vec<RawEvent> => Events,
    Vec<RawEventAdmin> => EventAdmins,
}
