//! Route definitions for the dashboard API

use crate::{handlers, openapi, AppState};
use axum::{
    routing::{get, post},
    Router,
};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Repository
        .route("/tree", get(handlers::get_tree))
        .route("/file", get(handlers::get_file))
        .route("/problems", get(handlers::list_problems))
        // Statistics
        .route(
            "/statistics",
            get(handlers::get_statistics).post(handlers::save_statistics),
        )
        .route("/statistics/problems", post(handlers::add_problem))
        .route(
            "/statistics/problems/status",
            post(handlers::update_problem_status),
        )
        // Documentation
        .route("/openapi.json", get(openapi::openapi_json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WebConfig;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_check_route() {
        let state = AppState::new(WebConfig::default());
        let app = api_routes().with_state(state);

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/health")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
