//! Utility functions for token generation, request parsing and input handling.
//!
//! - [`token_generator`] - Random token generation and alias validation
//! - [`url_validator`] - Target URL validation
//! - [`date_parser`] - Expiry date parsing
//! - [`client_ip`] - Client address extraction from requests

pub mod client_ip;
pub mod date_parser;
pub mod token_generator;
pub mod url_validator;
