//! Handler for link info endpoint.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::info::InfoResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns a link's metadata without recording a visit.
///
/// # Endpoint
///
/// `GET /info/{shortUrl}`
///
/// Expired links are still reported.
///
/// # Errors
///
/// Returns 404 Not Found if the token is unknown.
pub async fn info_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<InfoResponse>, AppError> {
    let link = state.link_service.get_info(&token).await?;
    Ok(Json(InfoResponse::from(link)))
}
