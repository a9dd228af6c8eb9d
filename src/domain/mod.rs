//! Domain layer containing business entities and data contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures (links, access events)
//! - [`repositories`] - Data access trait definitions
//! - [`clock`] - Injected time source
//!
//! The domain layer has no dependencies on infrastructure or presentation.
//! Business rules live in [`crate::application::services`].
//!
//! # Redirect Flow
//!
//! 1. HTTP handler receives the short token
//! 2. [`crate::application::services::LinkService::resolve`] checks expiry
//! 3. The click counter is incremented via [`repositories::LinkRepository`]
//! 4. An access event is appended via [`repositories::AnalyticsRepository`]

pub mod clock;
pub mod entities;
pub mod repositories;
