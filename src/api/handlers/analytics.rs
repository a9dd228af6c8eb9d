//! Handler for link analytics endpoint.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::analytics::AnalyticsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the access count and the five most recent accesses.
///
/// # Endpoint
///
/// `GET /analytics/{shortUrl}`
///
/// # Response
///
/// ```json
/// {
///   "clickCount": 7,
///   "analytics": [
///     { "shortUrl": "http://localhost:5000/abc123", "ip": "203.0.113.7", "openedDate": "2025-01-01T10:00:00Z" }
///   ]
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if no access has been recorded, including for
/// unknown tokens. `details.link_exists` tells the two cases apart.
pub async fn analytics_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let summary = state.analytics_service.get_analytics_summary(&token).await?;
    Ok(Json(AnalyticsResponse::from(summary)))
}
