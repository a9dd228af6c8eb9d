//! HTTP server initialization and runtime setup.
//!
//! Opens the snapshot stores, wires the services and runs the Axum server
//! until Ctrl+C.

use crate::config::Config;
use crate::domain::clock::SystemClock;
use crate::domain::repositories::{AnalyticsRepository, LinkRepository};
use crate::infrastructure::persistence::{
    JsonFileStore, SnapshotAnalyticsRepository, SnapshotLinkRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - JSON snapshot stores for links and access events
/// - Link and analytics services
/// - Axum HTTP server with graceful shutdown
///
/// Snapshot files are not created until the first write. An unreadable
/// snapshot at startup is reported but does not stop the server.
///
/// # Errors
///
/// Returns an error if:
/// - The listen address is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let link_repository: Arc<dyn LinkRepository> = Arc::new(SnapshotLinkRepository::new(
        JsonFileStore::new(&config.links_file),
    ));
    let analytics_repository: Arc<dyn AnalyticsRepository> = Arc::new(
        SnapshotAnalyticsRepository::new(JsonFileStore::new(&config.analytics_file)),
    );

    match link_repository.probe().await {
        Ok(count) => tracing::info!(count, "Link snapshot loaded"),
        Err(e) => tracing::warn!(error = %e, "Link snapshot unreadable"),
    }
    match analytics_repository.probe().await {
        Ok(count) => tracing::info!(count, "Analytics snapshot loaded"),
        Err(e) => tracing::warn!(error = %e, "Analytics snapshot unreadable"),
    }

    let state = AppState::new(
        link_repository,
        analytics_repository,
        Arc::new(SystemClock),
        config.link_settings(),
        config.behind_proxy,
    );

    let app = app_router(state, &config.cors_allowed_origins);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::warn!(
            "Failed to listen for Ctrl+C: {}. Shutting down anyway.",
            e
        ),
    }
}
