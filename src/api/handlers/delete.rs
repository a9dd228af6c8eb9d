//! Handler for link deletion.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::api::dto::message::MessageResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Deletes a link together with its access events.
///
/// # Endpoint
///
/// `DELETE /delete/{shortUrl}`
///
/// # Errors
///
/// Returns 404 Not Found if the token is unknown.
pub async fn delete_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.link_service.delete_link(&token).await? {
        return Err(AppError::not_found(
            "Short URL not found",
            json!({ "short_url": state.link_service.format_short_url(&token) }),
        ));
    }

    Ok(Json(MessageResponse::new("Short url deleted!")))
}
