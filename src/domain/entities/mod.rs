//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`Link`] - A shortened URL mapping with its click counter
//! - [`AccessEvent`] - One recorded visit to a short URL
//!
//! Creation inputs are separate structs (`NewLink`, `NewAccessEvent`).

pub mod access_event;
pub mod link;

pub use access_event::{AccessEvent, NewAccessEvent};
pub use link::{Link, NewLink};
