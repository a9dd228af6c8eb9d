//! In-memory implementation of the snapshot store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::repositories::{SnapshotStore, StoreError};

/// Keeps the snapshot in a vector.
///
/// Used by tests. Nothing survives the process.
pub struct MemoryStore<T> {
    items: RwLock<Vec<T>>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    /// Creates a store pre-populated with `items`.
    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> SnapshotStore<T> for MemoryStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn read_all(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.items.read().await.clone())
    }

    async fn write_all(&self, items: &[T]) -> Result<(), StoreError> {
        *self.items.write().await = items.to_vec();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
