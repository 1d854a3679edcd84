//! Repository browsing handlers

use super::types::{ErrorResponse, FileContentResponse, FileQuery};
use crate::{AppState, WebError, WebResult};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
};
use dsadash_core::{ErrorKind, MarkdownFile, TreeNode};
use std::sync::Arc;
use tracing::{info, warn};

/// Get the repository tree
#[utoipa::path(
    get,
    path = "/api/tree",
    tag = "Repository",
    summary = "Repository tree",
    description = "Walk the problems directory and return the nested tree. Directory nodes \
                   carry `children`, file nodes carry optional `metadata`.",
    responses(
        (status = 200, description = "Tree rooted at the configured directory"),
        (status = 500, description = "Repository root cannot be listed", body = ErrorResponse)
    )
)]
pub async fn get_tree(State(state): State<AppState>) -> WebResult<Json<TreeNode>> {
    let repository = Arc::clone(&state.repository);
    let tree = tokio::task::spawn_blocking(move || repository.build_tree())
        .await
        .map_err(|e| WebError::Internal(format!("Tree walk task failed: {}", e)))??;

    info!(files = tree.file_count(), "Repository tree served");
    Ok(Json(tree))
}

/// Get file content and metadata
#[utoipa::path(
    get,
    path = "/api/file",
    tag = "Repository",
    summary = "File content",
    params(
        ("path" = String, Query, description = "Absolute path or path relative to the repository root")
    ),
    responses(
        (status = 200, description = "File content with inferred metadata", body = FileContentResponse),
        (status = 400, description = "Missing path parameter", body = ErrorResponse),
        (status = 404, description = "File not found or could not be read", body = ErrorResponse)
    )
)]
pub async fn get_file(
    State(state): State<AppState>,
    query: Result<Query<FileQuery>, QueryRejection>,
) -> WebResult<Json<FileContentResponse>> {
    let Query(query) = query.map_err(|e| WebError::BadRequest(e.body_text()))?;
    let path = query
        .path
        .filter(|path| !path.trim().is_empty())
        .ok_or_else(|| WebError::BadRequest("File path is required".to_string()))?;

    let repository = Arc::clone(&state.repository);
    let lookup = path.clone();
    let file = tokio::task::spawn_blocking(move || repository.file_with_metadata(&lookup))
        .await
        .map_err(|e| WebError::Internal(format!("File read task failed: {}", e)))?
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                warn!(path = %path, "Requested file is not readable");
                WebError::NotFound("File not found or could not be read".to_string())
            }
            _ => WebError::from(e),
        })?;

    Ok(Json(FileContentResponse {
        content: file.content,
        metadata: file.metadata,
    }))
}

/// List every markdown file
#[utoipa::path(
    get,
    path = "/api/problems",
    tag = "Repository",
    summary = "Markdown listing",
    description = "Flat list of markdown files under the repository root, sorted by relative path",
    responses(
        (status = 200, description = "Markdown files", body = [MarkdownFile]),
        (status = 500, description = "Repository root cannot be listed", body = ErrorResponse)
    )
)]
pub async fn list_problems(State(state): State<AppState>) -> WebResult<Json<Vec<MarkdownFile>>> {
    let repository = Arc::clone(&state.repository);
    let files = tokio::task::spawn_blocking(move || repository.list_markdown_files())
        .await
        .map_err(|e| WebError::Internal(format!("Listing task failed: {}", e)))??;

    Ok(Json(files))
}
