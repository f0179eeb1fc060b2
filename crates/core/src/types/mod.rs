//! Value types for the Mod'Art content model.
//!
//! This module provides type-safe wrappers for identifiers and the
//! constrained string and enum fields of Directus records.

pub mod email;
pub mod id;
pub mod slug;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use slug::{Slug, SlugError};
pub use status::*;
