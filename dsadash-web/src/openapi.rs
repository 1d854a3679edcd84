//! OpenAPI specification for the dashboard API

use axum::response::Json;
use utoipa::OpenApi;

use crate::handlers::{
    AddProblemRequest, ErrorResponse, FileContentResponse, HealthResponse, NewProblem,
    RouteNotFoundResponse, SaveStatisticsResponse, UpdateProblemStatusRequest,
};
use dsadash_core::{
    Difficulty, MarkdownFile, ProblemDetail, ProblemMetadata, StatisticsDocument, TopicStat,
};

/// Main OpenAPI specification for the dashboard server
#[derive(OpenApi)]
#[openapi(
    info(
        title = "DSA Dashboard API",
        version = "0.1.0",
        description = "Problem repository browsing and progress statistics",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Health endpoints
        crate::handlers::health_check,

        // Repository
        crate::handlers::get_tree,
        crate::handlers::get_file,
        crate::handlers::list_problems,

        // Statistics
        crate::handlers::get_statistics,
        crate::handlers::save_statistics,
        crate::handlers::update_problem_status,
        crate::handlers::add_problem,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            RouteNotFoundResponse,
            FileContentResponse,
            SaveStatisticsResponse,
            UpdateProblemStatusRequest,
            AddProblemRequest,
            NewProblem,
            MarkdownFile,
            ProblemMetadata,
            Difficulty,
            StatisticsDocument,
            TopicStat,
            ProblemDetail,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Repository", description = "Problem files and the directory tree"),
        (name = "Statistics", description = "Progress statistics document"),
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
