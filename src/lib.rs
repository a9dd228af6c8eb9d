//! # Link Shortener
//!
//! A URL shortening service built with Axum, persisting to JSON snapshot files.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, clock and repository traits
//! - **Application Layer** ([`application`]) - Link lifecycle and analytics services
//! - **Infrastructure Layer** ([`infrastructure`]) - Snapshot stores and repositories
//! - **API Layer** ([`api`]) - REST handlers, DTOs and middleware
//!
//! ## Features
//!
//! - Custom aliases or random 6-character tokens
//! - Link expiry (one day by default) with `410 Gone` after it passes
//! - Click counting and a per-link access log with client addresses
//! - Admin CLI operating directly on the snapshot files
//!
//! ## Quick Start
//!
//! ```bash
//! export BACKEND_URL="http://localhost:5000"
//! cargo run
//!
//! curl -X POST localhost:5000/shorten \
//!   -H 'content-type: application/json' \
//!   -d '{"originalUrl":"https://example.com","alias":"demo"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        AnalyticsService, AnalyticsSummary, CreateLink, LinkService, LinkSettings,
    };
    pub use crate::domain::clock::{Clock, ManualClock, SystemClock};
    pub use crate::domain::entities::{AccessEvent, Link, NewAccessEvent, NewLink};
    pub use crate::domain::repositories::{AnalyticsRepository, LinkRepository, SnapshotStore};
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::{
        JsonFileStore, MemoryStore, SnapshotAnalyticsRepository, SnapshotLinkRepository,
    };
    pub use crate::state::AppState;
}
