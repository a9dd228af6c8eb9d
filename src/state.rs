//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AnalyticsService, LinkService, LinkSettings};
use crate::domain::clock::Clock;
use crate::domain::repositories::{AnalyticsRepository, LinkRepository};

pub type AppLinkService = LinkService<dyn LinkRepository, dyn AnalyticsRepository>;
pub type AppAnalyticsService = AnalyticsService<dyn AnalyticsRepository, dyn LinkRepository>;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<AppLinkService>,
    pub analytics_service: Arc<AppAnalyticsService>,
    pub link_repository: Arc<dyn LinkRepository>,
    pub analytics_repository: Arc<dyn AnalyticsRepository>,
    /// Trust `X-Forwarded-For` / `X-Real-IP` for the recorded client address.
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires both services over the given repositories.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        analytics_repository: Arc<dyn AnalyticsRepository>,
        clock: Arc<dyn Clock>,
        settings: LinkSettings,
        behind_proxy: bool,
    ) -> Self {
        let analytics_service = Arc::new(AnalyticsService::new(
            analytics_repository.clone(),
            link_repository.clone(),
            settings.base_url.clone(),
        ));

        let link_service = Arc::new(LinkService::new(
            link_repository.clone(),
            analytics_repository.clone(),
            clock,
            settings,
        ));

        Self {
            link_service,
            analytics_service,
            link_repository,
            analytics_repository,
            behind_proxy,
        }
    }
}
