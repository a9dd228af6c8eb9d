//! Snapshot-backed implementation of the link repository.

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkRepository, SnapshotStore};
use crate::error::AppError;

/// Link repository over any [`SnapshotStore`].
///
/// Every operation reads the full snapshot; mutations write it back. All
/// read-modify-write cycles hold `write_lock`, so mutations within one process
/// never interleave. Other processes writing the same file are not detected.
///
/// # Read failures
///
/// Queries treat an unreadable snapshot as empty and log a warning. Mutations
/// refuse to run on an unreadable snapshot, so a corrupt file is never
/// overwritten with a partial collection.
pub struct SnapshotLinkRepository<S> {
    store: S,
    write_lock: Mutex<()>,
}

impl<S: SnapshotStore<Link>> SnapshotLinkRepository<S> {
    /// Creates a new repository over `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Reads the snapshot, recovering from failures with an empty collection.
    async fn read_all(&self) -> Vec<Link> {
        match self.store.read_all().await {
            Ok(links) => links,
            Err(e) => {
                warn!(
                    error = %e,
                    store = %self.store.describe(),
                    "Failed to read link snapshot, treating as empty"
                );
                Vec::new()
            }
        }
    }

    async fn write_all(&self, links: &[Link]) -> Result<(), AppError> {
        self.store.write_all(links).await.map_err(AppError::from)
    }
}

#[async_trait]
impl<S: SnapshotStore<Link>> LinkRepository for SnapshotLinkRepository<S> {
    async fn list(&self) -> Result<Vec<Link>, AppError> {
        Ok(self.read_all().await)
    }

    async fn find_by_short_url(&self, short_url: &str) -> Result<Option<Link>, AppError> {
        Ok(self
            .read_all()
            .await
            .into_iter()
            .find(|l| l.short_url == short_url))
    }

    async fn add(&self, new_link: NewLink) -> Result<Link, AppError> {
        let _guard = self.write_lock.lock().await;

        let mut links = self.store.read_all().await?;
        if links.iter().any(|l| l.short_url == new_link.short_url) {
            return Err(AppError::conflict(
                "Url with this alias already exists",
                json!({ "short_url": new_link.short_url }),
            ));
        }

        let link = Link::from(new_link);
        links.push(link.clone());
        self.write_all(&links).await?;

        debug!(short_url = %link.short_url, "Link stored");
        Ok(link)
    }

    async fn increment_clicks(&self, short_url: &str) -> Result<Option<Link>, AppError> {
        let _guard = self.write_lock.lock().await;

        let mut links = self.store.read_all().await?;
        let Some(link) = links.iter_mut().find(|l| l.short_url == short_url) else {
            return Ok(None);
        };

        link.click_count += 1;
        let updated = link.clone();
        self.write_all(&links).await?;

        Ok(Some(updated))
    }

    async fn delete_by_short_url(&self, short_url: &str) -> Result<bool, AppError> {
        let _guard = self.write_lock.lock().await;

        let mut links = self.store.read_all().await?;
        let before = links.len();
        links.retain(|l| l.short_url != short_url);

        if links.len() == before {
            return Ok(false);
        }

        self.write_all(&links).await?;
        Ok(true)
    }

    async fn probe(&self) -> Result<usize, AppError> {
        Ok(self.store.read_all().await?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::StoreError;
    use crate::infrastructure::persistence::MemoryStore;
    use chrono::Utc;
    use std::path::PathBuf;
    use std::sync::Arc;

    /// A store whose reads or writes always fail.
    struct BrokenStore {
        fail_reads: bool,
        inner: MemoryStore<Link>,
    }

    fn broken() -> StoreError {
        StoreError::Io {
            path: PathBuf::from("broken.json"),
            source: std::io::Error::other("disk on fire"),
        }
    }

    #[async_trait]
    impl SnapshotStore<Link> for BrokenStore {
        async fn read_all(&self) -> Result<Vec<Link>, StoreError> {
            if self.fail_reads {
                Err(broken())
            } else {
                self.inner.read_all().await
            }
        }

        async fn write_all(&self, _items: &[Link]) -> Result<(), StoreError> {
            Err(broken())
        }

        fn describe(&self) -> String {
            "broken".to_string()
        }
    }

    fn new_link(short_url: &str) -> NewLink {
        NewLink {
            original_url: "https://example.com".to_string(),
            short_url: short_url.to_string(),
            created_at: Utc::now(),
            expires_at: None,
        }
    }

    #[tokio::test]
    async fn test_add_and_find() {
        let repo = SnapshotLinkRepository::new(MemoryStore::new());

        let link = repo.add(new_link("http://s/abc")).await.unwrap();
        assert_eq!(link.click_count, 0);

        let found = repo.find_by_short_url("http://s/abc").await.unwrap();
        assert_eq!(found, Some(link));
        assert!(repo.find_by_short_url("http://s/ABC").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_duplicate_is_conflict() {
        let repo = SnapshotLinkRepository::new(MemoryStore::new());

        repo.add(new_link("http://s/dup")).await.unwrap();
        let result = repo.add(new_link("http://s/dup")).await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_adds_only_one_wins() {
        let repo = Arc::new(SnapshotLinkRepository::new(MemoryStore::new()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.add(new_link("http://s/race")).await })
            })
            .collect();

        let mut ok = 0;
        for h in handles {
            if h.await.unwrap().is_ok() {
                ok += 1;
            }
        }

        assert_eq!(ok, 1);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_not_lost() {
        let repo = Arc::new(SnapshotLinkRepository::new(MemoryStore::new()));
        repo.add(new_link("http://s/hot")).await.unwrap();

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.increment_clicks("http://s/hot").await })
            })
            .collect();
        for h in handles {
            h.await.unwrap().unwrap();
        }

        let link = repo.find_by_short_url("http://s/hot").await.unwrap().unwrap();
        assert_eq!(link.click_count, 50);
    }

    #[tokio::test]
    async fn test_increment_unknown_returns_none() {
        let repo = SnapshotLinkRepository::new(MemoryStore::new());
        assert!(repo.increment_clicks("http://s/none").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = SnapshotLinkRepository::new(MemoryStore::new());
        repo.add(new_link("http://s/a")).await.unwrap();
        repo.add(new_link("http://s/b")).await.unwrap();

        assert!(repo.delete_by_short_url("http://s/a").await.unwrap());
        assert!(!repo.delete_by_short_url("http://s/a").await.unwrap());

        let remaining = repo.list().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].short_url, "http://s/b");
    }

    #[tokio::test]
    async fn test_unreadable_snapshot_queries_as_empty() {
        let repo = SnapshotLinkRepository::new(BrokenStore {
            fail_reads: true,
            inner: MemoryStore::new(),
        });

        assert!(repo.list().await.unwrap().is_empty());
        assert!(repo.find_by_short_url("http://s/a").await.unwrap().is_none());
        assert!(matches!(
            repo.probe().await,
            Err(AppError::Internal { .. })
        ));
    }

    #[tokio::test]
    async fn test_unreadable_snapshot_blocks_mutation() {
        let repo = SnapshotLinkRepository::new(BrokenStore {
            fail_reads: true,
            inner: MemoryStore::new(),
        });

        let result = repo.add(new_link("http://s/a")).await;
        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_write_failure_is_reported() {
        let repo = SnapshotLinkRepository::new(BrokenStore {
            fail_reads: false,
            inner: MemoryStore::new(),
        });

        let result = repo.add(new_link("http://s/a")).await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
        assert!(repo.list().await.unwrap().is_empty());
    }
}
