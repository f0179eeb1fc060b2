//! Newtype IDs for type-safe entity references.
//!
//! Every Directus record is keyed by a UUID. Use the `define_id!` macro to
//! create a wrapper per collection so a `StudentId` can never be passed
//! where a `ProjectId` is expected.

/// Macro to define a type-safe UUID wrapper.
///
/// Creates a newtype wrapper around [`uuid::Uuid`] with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_uuid()`
/// - `Display` and `FromStr` using the hyphenated UUID form
/// - `From<Uuid>` and `Into<Uuid>` implementations
///
/// # Example
///
/// ```rust
/// # use modart_core::define_id;
/// define_id!(CourseId);
/// define_id!(ClassroomId);
///
/// let course: CourseId = "0f8fad5b-d9cb-469f-a165-70867728950e".parse().unwrap();
/// assert_eq!(course.to_string(), "0f8fad5b-d9cb-469f-a165-70867728950e");
///
/// // These are different types, so this won't compile:
/// // let _: ClassroomId = course;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Wrap an existing UUID.
            #[must_use]
            pub const fn new(id: ::uuid::Uuid) -> Self {
                Self(id)
            }

            /// Get the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> ::uuid::Uuid {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::uuid::Error;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                ::uuid::Uuid::parse_str(s).map(Self)
            }
        }

        impl From<::uuid::Uuid> for $name {
            fn from(id: ::uuid::Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for ::uuid::Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Directus system collections
define_id!(RoleId);
define_id!(UserId);
define_id!(FileId);

// Site collections
define_id!(StudentId);
define_id!(ProjectId);
define_id!(ProjectImageId);
define_id!(EventId);
define_id!(EventAdminId);
define_id!(SocialNetworkId);
