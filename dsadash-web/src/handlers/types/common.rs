//! Common types used across multiple handlers

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Seconds since the server started
    #[schema(example = 12.5)]
    pub uptime_seconds: f64,
    #[schema(example = "0.1.0")]
    pub version: String,
}

/// Body of every failed request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "File not found or could not be read")]
    pub error: String,
}

/// Body returned for unknown routes
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RouteNotFoundResponse {
    #[schema(example = "Resource not found")]
    pub error: String,
    #[schema(example = "/api/unknown")]
    pub path: String,
}
