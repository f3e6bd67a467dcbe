use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{tag, tag_group};
use crate::error::AppError;

use super::shared::{double_option, validate_optional, validate_required};

#[derive(Deserialize, ToSchema)]
pub struct CreateTagGroupRequest {
    #[schema(example = "Difficulty")]
    pub group_name: String,
}

#[derive(Deserialize, Default, PartialEq, ToSchema)]
pub struct UpdateTagGroupRequest {
    pub group_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct TagGroupResponse {
    pub tag_group_id: i32,
    pub group_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateTagRequest {
    #[schema(example = "Easy")]
    pub tag_name: String,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

#[derive(Deserialize, Default, PartialEq, ToSchema)]
pub struct UpdateTagRequest {
    pub tag_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub sort_order: Option<Option<i32>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct TagResponse {
    pub tag_id: i32,
    pub tag_group_id: i32,
    pub tag_name: String,
    pub sort_order: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
}

impl From<tag_group::Model> for TagGroupResponse {
    fn from(m: tag_group::Model) -> Self {
        Self {
            tag_group_id: m.tag_group_id,
            group_name: m.group_name,
            created_at: m.created_at,
            updated_at: m.updated_at,
            created_by: m.created_by,
            updated_by: m.updated_by,
        }
    }
}

impl From<tag::Model> for TagResponse {
    fn from(m: tag::Model) -> Self {
        Self {
            tag_id: m.tag_id,
            tag_group_id: m.tag_group_id,
            tag_name: m.tag_name,
            sort_order: m.sort_order,
            created_at: m.created_at,
            updated_at: m.updated_at,
            created_by: m.created_by,
            updated_by: m.updated_by,
        }
    }
}

pub fn validate_create_tag_group(req: &CreateTagGroupRequest) -> Result<(), AppError> {
    validate_required(&req.group_name, "group_name")
}

pub fn validate_update_tag_group(req: &UpdateTagGroupRequest) -> Result<(), AppError> {
    validate_optional(req.group_name.as_deref(), "group_name")
}

pub fn validate_create_tag(req: &CreateTagRequest) -> Result<(), AppError> {
    validate_required(&req.tag_name, "tag_name")
}

pub fn validate_update_tag(req: &UpdateTagRequest) -> Result<(), AppError> {
    validate_optional(req.tag_name.as_deref(), "tag_name")
}
