//! Access analytics service.

use std::sync::Arc;

use serde_json::json;

use crate::application::services::link_service::format_short_url;
use crate::domain::entities::AccessEvent;
use crate::domain::repositories::{AnalyticsRepository, LinkRepository};
use crate::error::AppError;

/// How many of the newest access events a summary carries.
pub const RECENT_EVENTS_LIMIT: usize = 5;

/// Total access count plus the newest events, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsSummary {
    pub short_url: String,
    pub total_count: usize,
    pub recent_events: Vec<AccessEvent>,
}

/// Service for reading the access log of a short link.
pub struct AnalyticsService<A: AnalyticsRepository + ?Sized, L: LinkRepository + ?Sized> {
    analytics_repository: Arc<A>,
    link_repository: Arc<L>,
    base_url: String,
}

impl<A: AnalyticsRepository + ?Sized, L: LinkRepository + ?Sized> AnalyticsService<A, L> {
    /// Creates a new analytics service.
    pub fn new(analytics_repository: Arc<A>, link_repository: Arc<L>, base_url: String) -> Self {
        Self {
            analytics_repository,
            link_repository,
            base_url,
        }
    }

    /// Summarizes the access log for a token.
    ///
    /// `total_count` is the number of recorded events, which can differ from
    /// the link's click counter if one of the two writes failed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no events are recorded. The
    /// details tell apart an unknown token (`link_exists: false`) from a link
    /// that was never opened (`link_exists: true`).
    pub async fn get_analytics_summary(&self, token: &str) -> Result<AnalyticsSummary, AppError> {
        let short_url = format_short_url(&self.base_url, token);

        let mut events = self
            .analytics_repository
            .query_by_short_url(&short_url)
            .await?;

        if events.is_empty() {
            let link_exists = self
                .link_repository
                .find_by_short_url(&short_url)
                .await?
                .is_some();

            let message = if link_exists {
                "No analytics recorded for this short URL"
            } else {
                "Short URL not found"
            };

            return Err(AppError::not_found(
                message,
                json!({ "short_url": short_url, "link_exists": link_exists }),
            ));
        }

        let total_count = events.len();
        let recent_events = events.split_off(total_count.saturating_sub(RECENT_EVENTS_LIMIT));

        Ok(AnalyticsSummary {
            short_url,
            total_count,
            recent_events,
        })
    }
}
