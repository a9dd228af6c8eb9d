//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use std::net::SocketAddr;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Redirects a short token to its original URL.
///
/// # Endpoint
///
/// `GET /{shortUrl}`
///
/// # Request Flow
///
/// 1. Look up the link for the token
/// 2. Reject it if expired (nothing is recorded)
/// 3. Increment the click counter and append an access event
/// 4. Return 302 Found with the original URL in `Location`
///
/// # Errors
///
/// Returns 404 Not Found if the token is unknown.
/// Returns 410 Gone if the link has expired.
pub async fn redirect_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let ip = client_ip(&headers, addr, state.behind_proxy);

    let link = state.link_service.resolve(&token, &ip).await?;

    let location = HeaderValue::try_from(link.original_url.as_str()).map_err(|e| {
        AppError::internal(
            "Stored URL is not a valid Location header",
            json!({ "reason": e.to_string() }),
        )
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}
