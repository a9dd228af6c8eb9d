//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to one endpoint.

pub mod analytics;
pub mod delete;
pub mod health;
pub mod info;
pub mod redirect;
pub mod shorten;

pub use analytics::analytics_handler;
pub use delete::delete_handler;
pub use health::health_handler;
pub use info::info_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
