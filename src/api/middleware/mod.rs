//! HTTP middleware for request processing.
//!
//! Provides cross-origin handling and request tracing.

pub mod cors;
pub mod tracing;
