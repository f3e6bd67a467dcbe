use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{genre, problem};
use crate::error::{AppError, EmptyBody, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::params::AppPath;
use crate::models::genre::*;
use crate::state::AppState;
use crate::utils::lookup::find_genre;

#[utoipa::path(
    get,
    path = "/genres/",
    tag = "Genres",
    operation_id = "listGenres",
    summary = "List all genres",
    responses((status = 200, description = "All genres", body = Vec<GenreResponse>)),
)]
#[instrument(skip(state))]
pub async fn list_genres(
    State(state): State<AppState>,
) -> Result<Json<Vec<GenreResponse>>, AppError> {
    let rows = genre::Entity::find()
        .order_by_asc(genre::Column::GenreId)
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(GenreResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/genres/",
    tag = "Genres",
    operation_id = "createGenre",
    summary = "Create a genre",
    request_body = CreateGenreRequest,
    responses(
        (status = 200, description = "Genre created", body = GenreResponse),
        (status = 422, description = "Validation error", body = EmptyBody),
    ),
)]
#[instrument(skip(state, payload), fields(genre_name = %payload.genre_name))]
pub async fn create_genre(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateGenreRequest>,
) -> Result<Json<GenreResponse>, AppError> {
    validate_create_genre(&payload)?;

    let now = chrono::Utc::now();
    let new_genre = genre::ActiveModel {
        genre_name: Set(payload.genre_name),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let model = new_genre.insert(&state.db).await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/genres/{id}",
    tag = "Genres",
    operation_id = "getGenre",
    summary = "Get a genre by ID",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Genre details", body = GenreResponse),
        (status = 404, description = "Genre not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_genre(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<GenreResponse>, AppError> {
    Ok(Json(find_genre(&state.db, id).await?.into()))
}

#[utoipa::path(
    put,
    path = "/genres/{id}",
    tag = "Genres",
    operation_id = "updateGenre",
    summary = "Update a genre",
    params(("id" = i32, Path, description = "Genre ID")),
    request_body = UpdateGenreRequest,
    responses(
        (status = 200, description = "Genre updated", body = GenreResponse),
        (status = 404, description = "Genre not found (NOT_FOUND)", body = ErrorBody),
        (status = 422, description = "Validation error", body = EmptyBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_genre(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateGenreRequest>,
) -> Result<Json<GenreResponse>, AppError> {
    validate_update_genre(&payload)?;

    let existing = find_genre(&state.db, id).await?;
    if payload == UpdateGenreRequest::default() {
        return Ok(Json(existing.into()));
    }

    let mut active: genre::ActiveModel = existing.into();
    if let Some(name) = payload.genre_name {
        active.genre_name = Set(name);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&state.db).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/genres/{id}",
    tag = "Genres",
    operation_id = "deleteGenre",
    summary = "Delete a genre",
    description = "Problems in the genre are kept with their genre cleared.",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 204, description = "Genre deleted"),
        (status = 404, description = "Genre not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_genre(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;

    find_genre(&txn, id).await?;

    problem::Entity::update_many()
        .col_expr(problem::Column::GenreId, Expr::value(Option::<i32>::None))
        .filter(problem::Column::GenreId.eq(id))
        .exec(&txn)
        .await?;
    genre::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
