use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::genre;
use crate::error::AppError;

use super::shared::{validate_optional, validate_required};

#[derive(Deserialize, ToSchema)]
pub struct CreateGenreRequest {
    #[schema(example = "Geography")]
    pub genre_name: String,
}

#[derive(Deserialize, Default, PartialEq, ToSchema)]
pub struct UpdateGenreRequest {
    pub genre_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct GenreResponse {
    pub genre_id: i32,
    pub genre_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
}

impl From<genre::Model> for GenreResponse {
    fn from(m: genre::Model) -> Self {
        Self {
            genre_id: m.genre_id,
            genre_name: m.genre_name,
            created_at: m.created_at,
            updated_at: m.updated_at,
            created_by: m.created_by,
            updated_by: m.updated_by,
        }
    }
}

pub fn validate_create_genre(req: &CreateGenreRequest) -> Result<(), AppError> {
    validate_required(&req.genre_name, "genre_name")
}

pub fn validate_update_genre(req: &UpdateGenreRequest) -> Result<(), AppError> {
    validate_optional(req.genre_name.as_deref(), "genre_name")
}
