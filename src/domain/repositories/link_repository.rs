//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// Links are keyed by their fully-qualified short URL.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SnapshotLinkRepository`] - snapshot-backed implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Returns every stored link in insertion order.
    ///
    /// An unreadable snapshot is logged and reported as empty.
    async fn list(&self) -> Result<Vec<Link>, AppError>;

    /// Finds a link by its fully-qualified short URL.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    async fn find_by_short_url(&self, short_url: &str) -> Result<Option<Link>, AppError>;

    /// Stores a new link with a click count of zero.
    ///
    /// The presence check and the write happen under one lock, so two
    /// concurrent calls for the same short URL cannot both succeed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a link with the same short URL exists.
    /// Returns [`AppError::Internal`] if the snapshot cannot be read or written.
    async fn add(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Increments the click count of a link by one and persists it.
    ///
    /// Returns the updated link, or `Ok(None)` if no link matches.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the snapshot cannot be read or written.
    async fn increment_clicks(&self, short_url: &str) -> Result<Option<Link>, AppError>;

    /// Removes every link with the given short URL.
    ///
    /// Returns `Ok(true)` if anything was removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the snapshot cannot be read or written.
    async fn delete_by_short_url(&self, short_url: &str) -> Result<bool, AppError>;

    /// Reads the snapshot without error recovery and returns the link count.
    ///
    /// Used by health checks.
    async fn probe(&self) -> Result<usize, AppError>;
}
