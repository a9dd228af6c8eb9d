//! Snapshot persistence.
//!
//! Stores hold a whole collection; repositories implement the domain
//! repository traits on top of any store.
//!
//! # Stores
//!
//! - [`JsonFileStore`] - JSON array in one file, atomic replace on write
//! - [`MemoryStore`] - in-process vector for tests
//!
//! # Repositories
//!
//! - [`SnapshotLinkRepository`] - Link storage and retrieval
//! - [`SnapshotAnalyticsRepository`] - Access event log

pub mod json_file_store;
pub mod memory_store;
pub mod snapshot_analytics_repository;
pub mod snapshot_link_repository;

pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;
pub use snapshot_analytics_repository::SnapshotAnalyticsRepository;
pub use snapshot_link_repository::SnapshotLinkRepository;
