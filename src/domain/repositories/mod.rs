//! Repository trait definitions for the domain layer.
//!
//! Traits define the data contracts; implementations live in
//! `crate::infrastructure::persistence`. Mocks are generated with `mockall`
//! for unit tests.
//!
//! # Available Traits
//!
//! - [`SnapshotStore`] - whole-collection read/write of one record type
//! - [`LinkRepository`] - short link lookups and mutations
//! - [`AnalyticsRepository`] - access event log
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod analytics_repository;
pub mod link_repository;
pub mod snapshot_store;

pub use analytics_repository::AnalyticsRepository;
pub use link_repository::LinkRepository;
pub use snapshot_store::{SnapshotStore, StoreError};

#[cfg(test)]
pub use analytics_repository::MockAnalyticsRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
