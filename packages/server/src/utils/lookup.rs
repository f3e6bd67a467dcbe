use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter};

use crate::entity::{comment, comment_group, genre, problem, tag, tag_group};
use crate::error::AppError;

/// Look up a problem by ID, returning 404 if not found.
pub async fn find_problem<C: ConnectionTrait>(db: &C, id: i32) -> Result<problem::Model, AppError> {
    problem::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("Problem"))
}

pub async fn find_genre<C: ConnectionTrait>(db: &C, id: i32) -> Result<genre::Model, AppError> {
    genre::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("Genre"))
}

pub async fn find_tag_group<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<tag_group::Model, AppError> {
    tag_group::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("TagGroup"))
}

pub async fn find_tag<C: ConnectionTrait>(db: &C, id: i32) -> Result<tag::Model, AppError> {
    tag::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("Tag"))
}

pub async fn find_comment_group<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<comment_group::Model, AppError> {
    comment_group::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("CommentGroup"))
}

pub async fn find_comment<C: ConnectionTrait>(db: &C, id: i32) -> Result<comment::Model, AppError> {
    comment::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("Comment"))
}

/// Check that every id in `tag_ids` names an existing tag (404 otherwise).
/// `tag_ids` must be free of duplicates.
pub async fn ensure_tags_exist<C: ConnectionTrait>(db: &C, tag_ids: &[i32]) -> Result<(), AppError> {
    if tag_ids.is_empty() {
        return Ok(());
    }
    let found = tag::Entity::find()
        .filter(tag::Column::TagId.is_in(tag_ids.iter().copied()))
        .count(db)
        .await?;
    if found != tag_ids.len() as u64 {
        return Err(AppError::not_found("Tag"));
    }
    Ok(())
}
