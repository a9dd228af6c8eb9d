//! DTO for link analytics endpoint.

use serde::Serialize;

use crate::application::services::AnalyticsSummary;
use crate::domain::entities::AccessEvent;

/// Access count and the most recent access events.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    /// Number of recorded access events.
    pub click_count: usize,
    /// Up to five newest events, oldest first.
    pub analytics: Vec<AccessEvent>,
}

impl From<AnalyticsSummary> for AnalyticsResponse {
    fn from(summary: AnalyticsSummary) -> Self {
        Self {
            click_count: summary.total_count,
            analytics: summary.recent_events,
        }
    }
}
