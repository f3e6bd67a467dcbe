use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{comment, comment_group};
use crate::error::AppError;

use super::shared::{double_option, validate_optional, validate_required};

#[derive(Deserialize, ToSchema)]
pub struct CreateCommentGroupRequest {
    #[schema(example = "Review")]
    pub group_name: String,
}

#[derive(Deserialize, Default, PartialEq, ToSchema)]
pub struct UpdateCommentGroupRequest {
    pub group_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct CommentGroupResponse {
    pub comment_group_id: i32,
    pub group_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub comment_group_id: Option<i32>,
    #[serde(default)]
    pub title: Option<String>,
    /// Must be non-empty.
    #[schema(example = "This is a test comment.")]
    pub body: String,
}

#[derive(Deserialize, Default, PartialEq, ToSchema)]
pub struct UpdateCommentRequest {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub comment_group_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub title: Option<Option<String>>,
    pub body: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct CommentResponse {
    pub comment_id: i32,
    pub problem_id: i32,
    pub comment_group_id: Option<i32>,
    pub title: Option<String>,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
}

impl From<comment_group::Model> for CommentGroupResponse {
    fn from(m: comment_group::Model) -> Self {
        Self {
            comment_group_id: m.comment_group_id,
            group_name: m.group_name,
            created_at: m.created_at,
            updated_at: m.updated_at,
            created_by: m.created_by,
            updated_by: m.updated_by,
        }
    }
}

impl From<comment::Model> for CommentResponse {
    fn from(m: comment::Model) -> Self {
        Self {
            comment_id: m.comment_id,
            problem_id: m.problem_id,
            comment_group_id: m.comment_group_id,
            title: m.title,
            body: m.body,
            created_at: m.created_at,
            updated_at: m.updated_at,
            created_by: m.created_by,
            updated_by: m.updated_by,
        }
    }
}

pub fn validate_create_comment_group(req: &CreateCommentGroupRequest) -> Result<(), AppError> {
    validate_required(&req.group_name, "group_name")
}

pub fn validate_update_comment_group(req: &UpdateCommentGroupRequest) -> Result<(), AppError> {
    validate_optional(req.group_name.as_deref(), "group_name")
}

pub fn validate_create_comment(req: &CreateCommentRequest) -> Result<(), AppError> {
    validate_required(&req.body, "body")
}

pub fn validate_update_comment(req: &UpdateCommentRequest) -> Result<(), AppError> {
    validate_optional(req.body.as_deref(), "body")
}
