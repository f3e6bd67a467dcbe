use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;

/// Structured error response returned by not-found and server failures.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `NOT_FOUND`, `INTERNAL_ERROR`.
    #[schema(example = "NOT_FOUND")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Problem not found")]
    pub message: String,
}

/// Body of a 422 response. Always serialized as `{}`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct EmptyBody {}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or invalid input. The detail is logged, never returned.
    Validation(String),
    NotFound(String),
    Internal(String),
}

impl AppError {
    pub fn not_found(entity: &str) -> Self {
        AppError::NotFound(format!("{entity} not found"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(detail) => {
                tracing::warn!("Request validation error: {}", detail);
                (StatusCode::UNPROCESSABLE_ENTITY, Json(EmptyBody {})).into_response()
            }
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                }),
            )
                .into_response(),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}
