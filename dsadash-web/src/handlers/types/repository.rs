//! Repository browsing types

use dsadash_core::ProblemMetadata;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Query string of `GET /api/file`
#[derive(Debug, Default, Deserialize)]
pub struct FileQuery {
    /// Absolute path, or a path relative to the repository root
    pub path: Option<String>,
}

/// File content with the metadata inferred from it
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileContentResponse {
    pub content: String,
    /// `null` for files that are not markdown
    pub metadata: Option<ProblemMetadata>,
}
