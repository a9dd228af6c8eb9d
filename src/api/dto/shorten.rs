//! DTOs for link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::application::services::CreateLink;
use crate::error::AppError;
use crate::utils::date_parser::{DateParseError, expires_at_from_millis, parse_expires_at};

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The original URL to shorten (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub original_url: String,

    /// Optional custom suffix used instead of a random token.
    #[validate(length(max = 20, message = "Alias must be at most 20 characters"))]
    pub alias: Option<String>,

    /// Optional expiry: a date string or epoch milliseconds.
    pub expires_at: Option<ExpiresAt>,
}

/// Wire forms accepted for `expiresAt`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ExpiresAt {
    /// Milliseconds since the Unix epoch.
    Millis(i64),
    /// RFC 3339, ISO date-time without offset, or `YYYY-MM-DD`.
    Text(String),
}

impl ExpiresAt {
    fn resolve(&self) -> Result<DateTime<Utc>, DateParseError> {
        match self {
            ExpiresAt::Millis(millis) => expires_at_from_millis(*millis),
            ExpiresAt::Text(text) => parse_expires_at(text),
        }
    }
}

impl ShortenRequest {
    /// Converts the request into a service command, parsing the expiry.
    ///
    /// An empty alias is treated as absent.
    pub fn into_command(self) -> Result<CreateLink, AppError> {
        let expires_at = self
            .expires_at
            .as_ref()
            .map(ExpiresAt::resolve)
            .transpose()
            .map_err(|e| {
                AppError::bad_request(
                    "Invalid expiresAt",
                    json!({ "reason": e.to_string() }),
                )
            })?;

        Ok(CreateLink {
            original_url: self.original_url,
            alias: self.alias.filter(|a| !a.is_empty()),
            expires_at,
        })
    }
}

/// Response with the created short URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_url: String,
}
