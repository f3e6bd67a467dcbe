use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::sea_query::Query as SeaQuery;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{problem_tag, tag, tag_group};
use crate::error::{AppError, EmptyBody, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::params::AppPath;
use crate::models::tag::*;
use crate::state::AppState;
use crate::utils::lookup::{find_tag, find_tag_group};

#[utoipa::path(
    get,
    path = "/tag-groups/",
    tag = "Tags",
    operation_id = "listTagGroups",
    summary = "List all tag groups",
    responses((status = 200, description = "All tag groups", body = Vec<TagGroupResponse>)),
)]
#[instrument(skip(state))]
pub async fn list_tag_groups(
    State(state): State<AppState>,
) -> Result<Json<Vec<TagGroupResponse>>, AppError> {
    let rows = tag_group::Entity::find()
        .order_by_asc(tag_group::Column::TagGroupId)
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(TagGroupResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/tag-groups/",
    tag = "Tags",
    operation_id = "createTagGroup",
    summary = "Create a tag group",
    request_body = CreateTagGroupRequest,
    responses(
        (status = 200, description = "Tag group created", body = TagGroupResponse),
        (status = 422, description = "Validation error", body = EmptyBody),
    ),
)]
#[instrument(skip(state, payload), fields(group_name = %payload.group_name))]
pub async fn create_tag_group(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateTagGroupRequest>,
) -> Result<Json<TagGroupResponse>, AppError> {
    validate_create_tag_group(&payload)?;

    let now = chrono::Utc::now();
    let new_group = tag_group::ActiveModel {
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
    path = "/tag-groups/{id}",
    tag = "Tags",
    operation_id = "getTagGroup",
    summary = "Get a tag group by ID",
    params(("id" = i32, Path, description = "Tag group ID")),
    responses(
        (status = 200, description = "Tag group details", body = TagGroupResponse),
        (status = 404, description = "Tag group not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_tag_group(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<TagGroupResponse>, AppError> {
    Ok(Json(find_tag_group(&state.db, id).await?.into()))
}

#[utoipa::path(
    put,
    path = "/tag-groups/{id}",
    tag = "Tags",
    operation_id = "updateTagGroup",
    summary = "Update a tag group",
    params(("id" = i32, Path, description = "Tag group ID")),
    request_body = UpdateTagGroupRequest,
    responses(
        (status = 200, description = "Tag group updated", body = TagGroupResponse),
        (status = 404, description = "Tag group not found (NOT_FOUND)", body = ErrorBody),
        (status = 422, description = "Validation error", body = EmptyBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_tag_group(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateTagGroupRequest>,
) -> Result<Json<TagGroupResponse>, AppError> {
    validate_update_tag_group(&payload)?;

    let existing = find_tag_group(&state.db, id).await?;
    if payload == UpdateTagGroupRequest::default() {
        return Ok(Json(existing.into()));
    }

    let mut active: tag_group::ActiveModel = existing.into();
    if let Some(name) = payload.group_name {
        active.group_name = Set(name);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&state.db).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/tag-groups/{id}",
    tag = "Tags",
    operation_id = "deleteTagGroup",
    summary = "Delete a tag group",
    description = "Deletes the group, its tags, and every problem association of those tags.",
    params(("id" = i32, Path, description = "Tag group ID")),
    responses(
        (status = 204, description = "Tag group deleted"),
        (status = 404, description = "Tag group not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_tag_group(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;

    find_tag_group(&txn, id).await?;

    problem_tag::Entity::delete_many()
        .filter(
            problem_tag::Column::TagId.in_subquery(
                SeaQuery::select()
                    .column(tag::Column::TagId)
                    .from(tag::Entity)
                    .and_where(tag::Column::TagGroupId.eq(id))
                    .to_owned(),
            ),
        )
        .exec(&txn)
        .await?;
    tag::Entity::delete_many()
        .filter(tag::Column::TagGroupId.eq(id))
        .exec(&txn)
        .await?;
    tag_group::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/tag-groups/{id}/tags/",
    tag = "Tags",
    operation_id = "listTags",
    summary = "List the tags of a tag group",
    description = "Returns an empty list when the group does not exist.",
    params(("id" = i32, Path, description = "Tag group ID")),
    responses((status = 200, description = "Tags in the group", body = Vec<TagResponse>)),
)]
#[instrument(skip(state))]
pub async fn list_tags(
    State(state): State<AppState>,
    AppPath(tag_group_id): AppPath<i32>,
) -> Result<Json<Vec<TagResponse>>, AppError> {
    let rows = tag::Entity::find()
        .filter(tag::Column::TagGroupId.eq(tag_group_id))
        .order_by_asc(tag::Column::TagId)
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(TagResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/tag-groups/{id}/tags/",
    tag = "Tags",
    operation_id = "createTag",
    summary = "Create a tag in a tag group",
    params(("id" = i32, Path, description = "Tag group ID")),
    request_body = CreateTagRequest,
    responses(
        (status = 200, description = "Tag created", body = TagResponse),
        (status = 404, description = "Tag group not found (NOT_FOUND)", body = ErrorBody),
        (status = 422, description = "Validation error", body = EmptyBody),
    ),
)]
#[instrument(skip(state, payload), fields(tag_name = %payload.tag_name))]
pub async fn create_tag(
    State(state): State<AppState>,
    AppPath(tag_group_id): AppPath<i32>,
    AppJson(payload): AppJson<CreateTagRequest>,
) -> Result<Json<TagResponse>, AppError> {
    validate_create_tag(&payload)?;

    let txn = state.db.begin().await?;
    find_tag_group(&txn, tag_group_id).await?;

    let now = chrono::Utc::now();
    let new_tag = tag::ActiveModel {
        tag_group_id: Set(tag_group_id),
        tag_name: Set(payload.tag_name),
        sort_order: Set(payload.sort_order),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let model = new_tag.insert(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/tags/{id}",
    tag = "Tags",
    operation_id = "getTag",
    summary = "Get a tag by ID",
    params(("id" = i32, Path, description = "Tag ID")),
    responses(
        (status = 200, description = "Tag details", body = TagResponse),
        (status = 404, description = "Tag not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_tag(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<TagResponse>, AppError> {
    Ok(Json(find_tag(&state.db, id).await?.into()))
}

#[utoipa::path(
    put,
    path = "/tags/{id}",
    tag = "Tags",
    operation_id = "updateTag",
    summary = "Update a tag",
    params(("id" = i32, Path, description = "Tag ID")),
    request_body = UpdateTagRequest,
    responses(
        (status = 200, description = "Tag updated", body = TagResponse),
        (status = 404, description = "Tag not found (NOT_FOUND)", body = ErrorBody),
        (status = 422, description = "Validation error", body = EmptyBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_tag(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateTagRequest>,
) -> Result<Json<TagResponse>, AppError> {
    validate_update_tag(&payload)?;

    let existing = find_tag(&state.db, id).await?;
    if payload == UpdateTagRequest::default() {
        return Ok(Json(existing.into()));
    }

    let mut active: tag::ActiveModel = existing.into();
    if let Some(name) = payload.tag_name {
        active.tag_name = Set(name);
    }
    if let Some(sort_order) = payload.sort_order {
        active.sort_order = Set(sort_order);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&state.db).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/tags/{id}",
    tag = "Tags",
    operation_id = "deleteTag",
    summary = "Delete a tag",
    description = "Deletes the tag and detaches it from every problem.",
    params(("id" = i32, Path, description = "Tag ID")),
    responses(
        (status = 204, description = "Tag deleted"),
        (status = 404, description = "Tag not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_tag(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;

    find_tag(&txn, id).await?;

    problem_tag::Entity::delete_many()
        .filter(problem_tag::Column::TagId.eq(id))
        .exec(&txn)
        .await?;
    tag::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
