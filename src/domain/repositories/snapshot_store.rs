//! Whole-collection persistence contract.

use async_trait::async_trait;
use std::path::PathBuf;

/// Errors raised by a [`SnapshotStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt snapshot in {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A durable collection that is always read and written as one unit.
///
/// Implementations hold the entire collection in a single resource. There is
/// no partial or indexed access: callers read the snapshot, modify it in
/// memory and write it back.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::JsonFileStore`] - JSON array in a file
/// - [`crate::infrastructure::persistence::MemoryStore`] - in-process vector
#[async_trait]
pub trait SnapshotStore<T: Send + Sync>: Send + Sync {
    /// Returns the current snapshot.
    ///
    /// A store that has never been written returns an empty collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the resource exists but cannot be read or
    /// decoded.
    async fn read_all(&self) -> Result<Vec<T>, StoreError>;

    /// Replaces the persisted snapshot with `items`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the snapshot cannot be encoded or written.
    /// The previously persisted snapshot is left in place.
    async fn write_all(&self, items: &[T]) -> Result<(), StoreError>;

    /// Human-readable location of the store, used in logs.
    fn describe(&self) -> String;
}
