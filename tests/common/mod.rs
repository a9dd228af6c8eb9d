#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, extract::ConnectInfo, routing::get};
use axum_test::TestServer;
use chrono::{DateTime, Duration, TimeZone, Utc};
use link_shortener::api::handlers::health_handler;
use link_shortener::api::routes::link_routes;
use link_shortener::application::services::LinkSettings;
use link_shortener::domain::clock::ManualClock;
use link_shortener::domain::entities::{AccessEvent, Link};
use link_shortener::domain::repositories::{AnalyticsRepository, LinkRepository, SnapshotStore, StoreError};
use link_shortener::infrastructure::persistence::{
    MemoryStore, SnapshotAnalyticsRepository, SnapshotLinkRepository,
};
use link_shortener::state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower::Layer;

pub const BASE_URL: &str = "http://localhost:5000";
pub const PEER_ADDR: &str = "127.0.0.1:12345";

pub type MemoryLinkRepository = SnapshotLinkRepository<MemoryStore<Link>>;
pub type MemoryAnalyticsRepository = SnapshotAnalyticsRepository<MemoryStore<AccessEvent>>;

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
}

pub fn short_url(token: &str) -> String {
    format!("{BASE_URL}/{token}")
}

pub fn link(token: &str, expires_at: Option<DateTime<Utc>>, clicks: u64) -> Link {
    Link::new(
        "https://example.com/target".to_string(),
        short_url(token),
        start_time(),
        expires_at,
        clicks,
    )
}

pub fn event(token: &str, ip: &str, opened_date: DateTime<Utc>) -> AccessEvent {
    AccessEvent::new(short_url(token), ip.to_string(), opened_date)
}

/// Inserts a fixed peer address, standing in for `into_make_service_with_connect_info`.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = PEER_ADDR.parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

/// A store whose every operation fails with an I/O error.
pub struct FailingStore;

#[async_trait]
impl<T: Send + Sync + 'static> SnapshotStore<T> for FailingStore {
    async fn read_all(&self) -> Result<Vec<T>, StoreError> {
        Err(io_error())
    }

    async fn write_all(&self, _items: &[T]) -> Result<(), StoreError> {
        Err(io_error())
    }

    fn describe(&self) -> String {
        "failing".to_string()
    }
}

fn io_error() -> StoreError {
    StoreError::Io {
        path: PathBuf::from("/unavailable"),
        source: std::io::Error::other("disk unavailable"),
    }
}

/// Server over in-memory stores with a controllable clock.
pub struct TestApp {
    pub server: TestServer,
    pub clock: Arc<ManualClock>,
    pub links: Arc<MemoryLinkRepository>,
    pub analytics: Arc<MemoryAnalyticsRepository>,
}

pub fn test_app() -> TestApp {
    test_app_with(Vec::new(), Vec::new(), false)
}

pub fn test_app_with(links: Vec<Link>, events: Vec<AccessEvent>, behind_proxy: bool) -> TestApp {
    let clock = Arc::new(ManualClock::new(start_time()));
    let link_repo = Arc::new(SnapshotLinkRepository::new(MemoryStore::with_items(links)));
    let analytics_repo = Arc::new(SnapshotAnalyticsRepository::new(MemoryStore::with_items(
        events,
    )));

    let state = create_test_state(
        link_repo.clone(),
        analytics_repo.clone(),
        clock.clone(),
        behind_proxy,
    );

    TestApp {
        server: TestServer::new(test_router(state)).unwrap(),
        clock,
        links: link_repo,
        analytics: analytics_repo,
    }
}

pub fn create_test_state(
    links: Arc<dyn LinkRepository>,
    analytics: Arc<dyn AnalyticsRepository>,
    clock: Arc<ManualClock>,
    behind_proxy: bool,
) -> AppState {
    AppState::new(
        links,
        analytics,
        clock,
        LinkSettings {
            base_url: BASE_URL.to_string(),
            default_ttl: Duration::days(1),
        },
        behind_proxy,
    )
}

pub fn test_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(link_routes())
        .layer(MockConnectInfoLayer)
        .with_state(state)
}
