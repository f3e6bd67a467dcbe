use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Request body extractor for every create and update endpoint.
///
/// A body that is not JSON, lacks a required field or carries a field of the
/// wrong type answers 422 with `{}`. The serde message only reaches the log.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(body)) => Ok(AppJson(body)),
            Err(rejection) => Err(AppError::Validation(format!(
                "request body rejected ({}): {}",
                rejection.status(),
                rejection.body_text()
            ))),
        }
    }
}
