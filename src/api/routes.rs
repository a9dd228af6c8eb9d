//! API route configuration.

use crate::api::handlers::{
    analytics_handler, delete_handler, info_handler, redirect_handler, shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Link routes.
///
/// # Endpoints
///
/// - `POST   /shorten`               - Create a short URL
/// - `GET    /info/{shortUrl}`       - Link metadata
/// - `DELETE /delete/{shortUrl}`     - Delete a link and its events
/// - `GET    /analytics/{shortUrl}`  - Access count and recent accesses
/// - `GET    /{shortUrl}`            - Redirect to the original URL
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/info/{token}", get(info_handler))
        .route("/delete/{token}", delete(delete_handler))
        .route("/analytics/{token}", get(analytics_handler))
        .route("/{token}", get(redirect_handler))
}
