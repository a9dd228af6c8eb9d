//! DTO for link info endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Link;

/// Public view of a stored link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub click_count: u64,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<Link> for InfoResponse {
    fn from(link: Link) -> Self {
        Self {
            original_url: link.original_url,
            created_at: link.created_at,
            click_count: link.click_count,
            expires_at: link.expires_at,
        }
    }
}
