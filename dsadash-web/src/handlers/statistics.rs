//! Statistics handlers

use super::types::{
    AddProblemRequest, ErrorResponse, SaveStatisticsResponse, UpdateProblemStatusRequest,
};
use crate::{AppState, WebError, WebResult};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use dsadash_core::StatisticsDocument;
use tracing::info;

const NO_STATISTICS: &str = "Statistics file not found";

/// Get the statistics document
#[utoipa::path(
    get,
    path = "/api/statistics",
    tag = "Statistics",
    summary = "Read statistics",
    responses(
        (status = 200, description = "Persisted statistics document", body = StatisticsDocument),
        (status = 404, description = "Nothing persisted yet", body = ErrorResponse),
        (status = 500, description = "Statistics file is unreadable or malformed", body = ErrorResponse)
    )
)]
pub async fn get_statistics(State(state): State<AppState>) -> WebResult<Json<StatisticsDocument>> {
    state
        .statistics
        .load()
        .await?
        .map(Json)
        .ok_or_else(|| WebError::NotFound(NO_STATISTICS.to_string()))
}

/// Replace the statistics document
#[utoipa::path(
    post,
    path = "/api/statistics",
    tag = "Statistics",
    summary = "Save statistics",
    request_body = StatisticsDocument,
    responses(
        (status = 200, description = "Document saved", body = SaveStatisticsResponse),
        (status = 400, description = "Malformed body or inconsistent counters", body = ErrorResponse),
        (status = 500, description = "Document could not be written", body = ErrorResponse)
    )
)]
pub async fn save_statistics(
    State(state): State<AppState>,
    body: Result<Json<StatisticsDocument>, JsonRejection>,
) -> WebResult<Json<SaveStatisticsResponse>> {
    let Json(document) = body.map_err(|e| WebError::BadRequest(e.body_text()))?;

    state.statistics.save(&document).await?;
    info!(
        total = document.total_problems,
        solved = document.solved_problems,
        "Statistics replaced"
    );

    Ok(Json(SaveStatisticsResponse::saved()))
}

/// Set one problem's solved flag
#[utoipa::path(
    post,
    path = "/api/statistics/problems/status",
    tag = "Statistics",
    summary = "Update problem status",
    description = "Unknown problems and unchanged states leave the document as it is",
    request_body = UpdateProblemStatusRequest,
    responses(
        (status = 200, description = "Current document", body = StatisticsDocument),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 404, description = "Nothing persisted yet", body = ErrorResponse)
    )
)]
pub async fn update_problem_status(
    State(state): State<AppState>,
    body: Result<Json<UpdateProblemStatusRequest>, JsonRejection>,
) -> WebResult<Json<StatisticsDocument>> {
    let Json(request) = body.map_err(|e| WebError::BadRequest(e.body_text()))?;

    state
        .statistics
        .update_problem_status(&request.topic, &request.problem_name, request.solved)
        .await?
        .map(Json)
        .ok_or_else(|| WebError::NotFound(NO_STATISTICS.to_string()))
}

/// Start tracking a problem
#[utoipa::path(
    post,
    path = "/api/statistics/problems",
    tag = "Statistics",
    summary = "Add problem",
    request_body = AddProblemRequest,
    responses(
        (status = 200, description = "Updated document", body = StatisticsDocument),
        (status = 400, description = "Malformed body or empty names", body = ErrorResponse),
        (status = 500, description = "Document could not be written", body = ErrorResponse)
    )
)]
pub async fn add_problem(
    State(state): State<AppState>,
    body: Result<Json<AddProblemRequest>, JsonRejection>,
) -> WebResult<Json<StatisticsDocument>> {
    let Json(request) = body.map_err(|e| WebError::BadRequest(e.body_text()))?;

    let document = state
        .statistics
        .add_problem(&request.topic, request.problem.into())
        .await?;

    Ok(Json(document))
}
