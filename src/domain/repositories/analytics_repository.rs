//! Repository trait for the access event log.

use crate::domain::entities::{AccessEvent, NewAccessEvent};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the append-only access event log.
///
/// Events are returned in insertion order, which is chronological order.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SnapshotAnalyticsRepository`] - snapshot-backed implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_analytics.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Appends one event to the log.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the snapshot cannot be read or written.
    async fn append(&self, event: NewAccessEvent) -> Result<AccessEvent, AppError>;

    /// Returns all events for a short URL, oldest first.
    ///
    /// An unreadable snapshot is logged and reported as empty.
    async fn query_by_short_url(&self, short_url: &str) -> Result<Vec<AccessEvent>, AppError>;

    /// Removes all events for a short URL and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the snapshot cannot be read or written.
    async fn delete_by_short_url(&self, short_url: &str) -> Result<usize, AppError>;

    /// Returns the whole log, oldest first.
    async fn list(&self) -> Result<Vec<AccessEvent>, AppError>;

    /// Reads the snapshot without error recovery and returns the event count.
    async fn probe(&self) -> Result<usize, AppError>;
}
