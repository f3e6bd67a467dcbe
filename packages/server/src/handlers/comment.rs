use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{comment, comment_group};
use crate::error::{AppError, EmptyBody, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::params::AppPath;
use crate::models::comment::*;
use crate::state::AppState;
use crate::utils::lookup::{find_comment, find_comment_group, find_problem};

#[utoipa::path(
    get,
    path = "/problems/{id}/comments/",
    tag = "Comments",
    operation_id = "listComments",
    summary = "List the comments of a problem",
    description = "Returns an empty list when the problem does not exist.",
    params(("id" = i32, Path, description = "Problem ID")),
    responses((status = 200, description = "Comments on the problem", body = Vec<CommentResponse>)),
)]
#[instrument(skip(state))]
pub async fn list_comments(
    State(state): State<AppState>,
    AppPath(problem_id): AppPath<i32>,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    let rows = comment::Entity::find()
        .filter(comment::Column::ProblemId.eq(problem_id))
        .order_by_asc(comment::Column::CommentId)
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(CommentResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/problems/{id}/comments/",
    tag = "Comments",
    operation_id = "createComment",
    summary = "Comment on a problem",
    params(("id" = i32, Path, description = "Problem ID")),
    request_body = CreateCommentRequest,
    responses(
        (status = 200, description = "Comment created", body = CommentResponse),
        (status = 404, description = "Problem or comment group not found (NOT_FOUND)", body = ErrorBody),
        (status = 422, description = "Validation error, e.g. empty body", body = EmptyBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_comment(
    State(state): State<AppState>,
    AppPath(problem_id): AppPath<i32>,
    AppJson(payload): AppJson<CreateCommentRequest>,
) -> Result<Json<CommentResponse>, AppError> {
    validate_create_comment(&payload)?;

    let txn = state.db.begin().await?;
    find_problem(&txn, problem_id).await?;
    if let Some(group_id) = payload.comment_group_id {
        find_comment_group(&txn, group_id).await?;
    }

    let now = chrono::Utc::now();
    let new_comment = comment::ActiveModel {
        problem_id: Set(problem_id),
        comment_group_id: Set(payload.comment_group_id),
        title: Set(payload.title),
        body: Set(payload.body),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let model = new_comment.insert(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/comments/{id}",
    tag = "Comments",
    operation_id = "getComment",
    summary = "Get a comment by ID",
    params(("id" = i32, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Comment details", body = CommentResponse),
        (status = 404, description = "Comment not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_comment(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<CommentResponse>, AppError> {
    Ok(Json(find_comment(&state.db, id).await?.into()))
}

#[utoipa::path(
    put,
    path = "/comments/{id}",
    tag = "Comments",
    operation_id = "updateComment",
    summary = "Update a comment",
    params(("id" = i32, Path, description = "Comment ID")),
    request_body = UpdateCommentRequest,
    responses(
        (status = 200, description = "Comment updated", body = CommentResponse),
        (status = 404, description = "Comment or comment group not found (NOT_FOUND)", body = ErrorBody),
        (status = 422, description = "Validation error", body = EmptyBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_comment(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateCommentRequest>,
) -> Result<Json<CommentResponse>, AppError> {
    validate_update_comment(&payload)?;

    if payload == UpdateCommentRequest::default() {
        return Ok(Json(find_comment(&state.db, id).await?.into()));
    }

    let txn = state.db.begin().await?;
    let existing = find_comment(&txn, id).await?;
    let mut active: comment::ActiveModel = existing.into();

    match payload.comment_group_id {
        Some(Some(group_id)) => {
            find_comment_group(&txn, group_id).await?;
            active.comment_group_id = Set(Some(group_id));
        }
        Some(None) => active.comment_group_id = Set(None),
        None => {}
    }
    if let Some(title) = payload.title {
        active.title = Set(title);
    }
    if let Some(body) = payload.body {
        active.body = Set(body);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/comments/{id}",
    tag = "Comments",
    operation_id = "deleteComment",
    summary = "Delete a comment",
    params(("id" = i32, Path, description = "Comment ID")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 404, description = "Comment not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_comment(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    find_comment(&state.db, id).await?;
    comment::Entity::delete_by_id(id).exec(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/comment-groups/",
    tag = "Comments",
    operation_id = "listCommentGroups",
    summary = "List all comment groups",
    responses((status = 200, description = "All comment groups", body = Vec<CommentGroupResponse>)),
)]
#[instrument(skip(state))]
pub async fn list_comment_groups(
    State(state): State<AppState>,
) -> Result<Json<Vec<CommentGroupResponse>>, AppError> {
    let rows = comment_group::Entity::find()
        .order_by_asc(comment_group::Column::CommentGroupId)
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(CommentGroupResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/comment-groups/",
    tag = "Comments",
    operation_id = "createCommentGroup",
    summary = "Create a comment group",
    request_body = CreateCommentGroupRequest,
    responses(
        (status = 200, description = "Comment group created", body = CommentGroupResponse),
        (status = 422, description = "Validation error", body = EmptyBody),
    ),
)]
#[instrument(skip(state, payload), fields(group_name = %payload.group_name))]
pub async fn create_comment_group(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateCommentGroupRequest>,
) -> Result<Json<CommentGroupResponse>, AppError> {
    validate_create_comment_group(&payload)?;

    let now = chrono::Utc::now();
    let new_group = comment_group::ActiveModel {
        group_name: Set(payload.group_name),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let model = new_group.insert(&state.db).await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/comment-groups/{id}",
    tag = "Comments",
    operation_id = "getCommentGroup",
    summary = "Get a comment group by ID",
    params(("id" = i32, Path, description = "Comment group ID")),
    responses(
        (status = 200, description = "Comment group details", body = CommentGroupResponse),
        (status = 404, description = "Comment group not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_comment_group(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<CommentGroupResponse>, AppError> {
    Ok(Json(find_comment_group(&state.db, id).await?.into()))
}

#[utoipa::path(
    put,
    path = "/comment-groups/{id}",
    tag = "Comments",
    operation_id = "updateCommentGroup",
    summary = "Update a comment group",
    params(("id" = i32, Path, description = "Comment group ID")),
    request_body = UpdateCommentGroupRequest,
    responses(
        (status = 200, description = "Comment group updated", body = CommentGroupResponse),
        (status = 404, description = "Comment group not found (NOT_FOUND)", body = ErrorBody),
        (status = 422, description = "Validation error", body = EmptyBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_comment_group(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateCommentGroupRequest>,
) -> Result<Json<CommentGroupResponse>, AppError> {
    validate_update_comment_group(&payload)?;

    let existing = find_comment_group(&state.db, id).await?;
    if payload == UpdateCommentGroupRequest::default() {
        return Ok(Json(existing.into()));
    }

    let mut active: comment_group::ActiveModel = existing.into();
    if let Some(name) = payload.group_name {
        active.group_name = Set(name);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&state.db).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/comment-groups/{id}",
    tag = "Comments",
    operation_id = "deleteCommentGroup",
    summary = "Delete a comment group",
    description = "Comments in the group are kept and become uncategorized.",
    params(("id" = i32, Path, description = "Comment group ID")),
    responses(
        (status = 204, description = "Comment group deleted"),
        (status = 404, description = "Comment group not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_comment_group(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;

    find_comment_group(&txn, id).await?;

    comment::Entity::update_many()
        .col_expr(comment::Column::CommentGroupId, Expr::value(Option::<i32>::None))
        .filter(comment::Column::CommentGroupId.eq(id))
        .exec(&txn)
        .await?;
    comment_group::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
