//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shortened URL with its click counter.
///
/// `short_url` is the fully-qualified short URL (`{base}/{token}`) and is the
/// key every lookup compares against. Records are serialized with camelCase
/// keys, which is also the on-disk snapshot format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub original_url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub click_count: u64,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        original_url: String,
        short_url: String,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
        click_count: u64,
    ) -> Self {
        Self {
            original_url,
            short_url,
            created_at,
            expires_at,
            click_count,
        }
    }

    /// Returns true if `now` is strictly after the link's expiry time.
    ///
    /// Links without an expiry never expire. Expiry is derived on every call
    /// and never stored.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| now > e)
    }
}

/// Input data for creating a new link.
///
/// `created_at` is supplied by the caller so the service's clock is the
/// single source of time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub original_url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<NewLink> for Link {
    fn from(new_link: NewLink) -> Self {
        Link::new(
            new_link.original_url,
            new_link.short_url,
            new_link.created_at,
            new_link.expires_at,
            0,
        )
    }
}
