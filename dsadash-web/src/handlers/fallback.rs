//! Fallback for unknown routes

use super::types::RouteNotFoundResponse;
use axum::{
    extract::OriginalUri,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::debug;

/// JSON 404 for any path without a route
pub async fn not_found(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    debug!(path = %uri.path(), "No route matched");
    (
        StatusCode::NOT_FOUND,
        Json(RouteNotFoundResponse {
            error: "Resource not found".to_string(),
            path: uri.path().to_string(),
        }),
    )
}
