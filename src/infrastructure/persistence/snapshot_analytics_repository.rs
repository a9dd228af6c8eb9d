//! Snapshot-backed implementation of the analytics repository.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::warn;

use crate::domain::entities::{AccessEvent, NewAccessEvent};
use crate::domain::repositories::{AnalyticsRepository, SnapshotStore};
use crate::error::AppError;

/// Access event log over any [`SnapshotStore`].
///
/// Same discipline as
/// [`SnapshotLinkRepository`](super::SnapshotLinkRepository): full-snapshot
/// reads, locked read-modify-write for mutations, queries recover from read
/// failures with an empty log.
pub struct SnapshotAnalyticsRepository<S> {
    store: S,
    write_lock: Mutex<()>,
}

impl<S: SnapshotStore<AccessEvent>> SnapshotAnalyticsRepository<S> {
    /// Creates a new repository over `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> Vec<AccessEvent> {
        match self.store.read_all().await {
            Ok(events) => events,
            Err(e) => {
                warn!(
                    error = %e,
                    store = %self.store.describe(),
                    "Failed to read analytics snapshot, treating as empty"
                );
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl<S: SnapshotStore<AccessEvent>> AnalyticsRepository for SnapshotAnalyticsRepository<S> {
    async fn append(&self, event: NewAccessEvent) -> Result<AccessEvent, AppError> {
        let _guard = self.write_lock.lock().await;

        let mut events = self.store.read_all().await?;
        let event = AccessEvent::from(event);
        events.push(event.clone());
        self.store.write_all(&events).await?;

        Ok(event)
    }

    async fn query_by_short_url(&self, short_url: &str) -> Result<Vec<AccessEvent>, AppError> {
        Ok(self
            .read_all()
            .await
            .into_iter()
            .filter(|e| e.short_url == short_url)
            .collect())
    }

    async fn delete_by_short_url(&self, short_url: &str) -> Result<usize, AppError> {
        let _guard = self.write_lock.lock().await;

        let mut events = self.store.read_all().await?;
        let before = events.len();
        events.retain(|e| e.short_url != short_url);
        let removed = before - events.len();

        if removed > 0 {
            self.store.write_all(&events).await?;
        }

        Ok(removed)
    }

    async fn list(&self) -> Result<Vec<AccessEvent>, AppError> {
        Ok(self.read_all().await)
    }

    async fn probe(&self) -> Result<usize, AppError> {
        Ok(self.store.read_all().await?.len())
    }
}
