//! Application layer services implementing business logic.
//!
//! Services consume repository traits and expose the operations the HTTP
//! handlers and the admin CLI call.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link lifecycle
//! - [`services::analytics_service::AnalyticsService`] - Access log summaries

pub mod services;
