//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "originalUrl": "https://example.com",
///   "alias": "my-link",              // optional, up to 20 characters
///   "expiresAt": "2030-01-01"        // optional, RFC 3339 or YYYY-MM-DD
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "shortUrl": "http://localhost:5000/my-link" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for malformed JSON, an invalid URL, alias or date.
/// Returns 409 Conflict if the alias is already taken.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state
        .link_service
        .create_link(payload.into_command()?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_url: link.short_url,
        }),
    ))
}
