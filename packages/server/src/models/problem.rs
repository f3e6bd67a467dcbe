use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entity::{judging_criteria, problem};
use crate::error::AppError;

use super::shared::{double_option, validate_optional, validate_required};

/// A rubric entry supplied with a problem create or update.
#[derive(Deserialize, Clone, PartialEq, Debug, ToSchema)]
pub struct JudgingCriteriaCreate {
    #[schema(example = "accuracy")]
    pub criteria_type: String,
    #[schema(example = "Must be correct")]
    pub criteria_text: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateProblemRequest {
    #[schema(example = "What is the capital of France?")]
    pub problem_text: String,
    #[schema(example = "Paris")]
    pub answer: String,
    #[serde(default)]
    pub original_text: Option<String>,
    #[serde(default)]
    pub genre_id: Option<i32>,
    #[serde(default)]
    pub sort_order: Option<i32>,
    /// Tag ids to associate with the new problem.
    #[serde(default)]
    pub tags: Vec<i32>,
    #[serde(default)]
    pub judging_criteria: Vec<JudgingCriteriaCreate>,
}

/// Partial update. Absent fields are left untouched; nullable fields accept
/// an explicit `null` to clear them.
#[derive(Deserialize, Default, PartialEq, ToSchema)]
pub struct UpdateProblemRequest {
    pub problem_text: Option<String>,
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub original_text: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub genre_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub sort_order: Option<Option<i32>>,
    /// Replaces the problem's tag set when present.
    pub tags: Option<Vec<i32>>,
    /// Appended as new criterion rows; existing criteria are kept.
    pub judging_criteria: Option<Vec<JudgingCriteriaCreate>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct JudgingCriteriaResponse {
    pub criteria_id: i32,
    pub problem_id: i32,
    pub criteria_type: String,
    pub criteria_text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ProblemResponse {
    pub problem_id: i32,
    pub problem_text: String,
    pub answer: String,
    pub original_text: Option<String>,
    pub genre_id: Option<i32>,
    pub sort_order: Option<i32>,
    /// Ids of the tags attached to this problem, ascending.
    pub tags: Vec<i32>,
    pub judging_criteria: Vec<JudgingCriteriaResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
}

/// Filter and sort parameters for `GET /problems/`.
#[derive(Deserialize, Default, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProblemListQuery {
    /// Only problems in this genre.
    pub genre_id: Option<i32>,
    /// Only problems carrying at least one of these tags. Repeat the key for several ids.
    #[serde(default)]
    pub tag_id: Vec<i32>,
    /// Case-insensitive substring of the problem text.
    pub keyword: Option<String>,
    /// Comma-separated field names, e.g. `sort_order,problem_text`.
    pub order_by: Option<String>,
    /// `ASC` (default) or `DESC`.
    pub order_dir: Option<String>,
}

impl From<judging_criteria::Model> for JudgingCriteriaResponse {
    fn from(m: judging_criteria::Model) -> Self {
        Self {
            criteria_id: m.criteria_id,
            problem_id: m.problem_id,
            criteria_type: m.criteria_type,
            criteria_text: m.criteria_text,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl ProblemResponse {
    pub fn new(
        m: problem::Model,
        tags: Vec<i32>,
        judging_criteria: Vec<JudgingCriteriaResponse>,
    ) -> Self {
        Self {
            problem_id: m.problem_id,
            problem_text: m.problem_text,
            answer: m.answer,
            original_text: m.original_text,
            genre_id: m.genre_id,
            sort_order: m.sort_order,
            tags,
            judging_criteria,
            created_at: m.created_at,
            updated_at: m.updated_at,
            created_by: m.created_by,
            updated_by: m.updated_by,
        }
    }
}

fn validate_criteria(criteria: &[JudgingCriteriaCreate]) -> Result<(), AppError> {
    for c in criteria {
        validate_required(&c.criteria_type, "criteria_type")?;
        validate_required(&c.criteria_text, "criteria_text")?;
    }
    Ok(())
}

pub fn validate_create_problem(req: &CreateProblemRequest) -> Result<(), AppError> {
    validate_required(&req.problem_text, "problem_text")?;
    validate_criteria(&req.judging_criteria)
}

pub fn validate_update_problem(req: &UpdateProblemRequest) -> Result<(), AppError> {
    validate_optional(req.problem_text.as_deref(), "problem_text")?;
    if let Some(ref criteria) = req.judging_criteria {
        validate_criteria(criteria)?;
    }
    Ok(())
}
