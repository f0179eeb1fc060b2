//! Mod'Art Core - Content model and navigation state.
//!
//! This crate holds everything about the Mod'Art site that does not speak
//! HTTP:
//! - the typed content model read from Directus, with validation of raw
//!   backend records and composition of the page shapes
//! - the [`ContentSource`] repository trait and the resolvers built on it
//! - the header navigation state machine
//!
//! # Architecture
//!
//! No I/O happens here. The `site` crate supplies a Directus-backed
//! [`ContentSource`]; tests supply [`InMemoryContent`].
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, slugs, emails and status enums
//! - [`content`] - Entities, raw records, relations and resolvers
//! - [`navigation`] - Header state machine and menu links

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod content;
pub mod navigation;
pub mod types;

pub use content::{ContentSource, InMemoryContent};
pub use types::*;
