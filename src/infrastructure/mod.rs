//! Infrastructure layer for external integrations.
//!
//! Implements the interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Snapshot stores (JSON file, memory) and the repositories built on them

pub mod persistence;
