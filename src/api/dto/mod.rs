//! Data Transfer Objects for API requests and responses.
//!
//! Request and response bodies use camelCase keys. Request DTOs are checked
//! with validator before reaching the services.

pub mod analytics;
pub mod health;
pub mod info;
pub mod message;
pub mod shorten;
