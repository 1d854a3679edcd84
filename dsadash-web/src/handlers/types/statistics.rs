//! Statistics request/response types

use dsadash_core::{Difficulty, ProblemDetail};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Acknowledgement of a full document save
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaveStatisticsResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "Statistics saved successfully")]
    pub message: String,
}

impl SaveStatisticsResponse {
    pub fn saved() -> Self {
        Self {
            success: true,
            message: "Statistics saved successfully".to_string(),
        }
    }
}

/// Request to set one problem's solved flag
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProblemStatusRequest {
    #[schema(example = "Arrays")]
    pub topic: String,
    #[schema(example = "Two Sum")]
    pub problem_name: String,
    pub solved: bool,
}

/// Request to start tracking a problem
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddProblemRequest {
    #[schema(example = "Arrays")]
    pub topic: String,
    pub problem: NewProblem,
}

/// Problem fields accepted when adding; difficulty defaults to `Unknown`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NewProblem {
    #[schema(example = "Two Sum")]
    pub name: String,
    #[serde(default)]
    pub solved: bool,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
}

impl From<NewProblem> for ProblemDetail {
    fn from(problem: NewProblem) -> Self {
        ProblemDetail::new(problem.name, problem.solved, problem.difficulty.unwrap_or_default())
    }
}
