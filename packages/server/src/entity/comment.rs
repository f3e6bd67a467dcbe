use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "comment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub comment_id: i32,

    pub problem_id: i32,
    #[sea_orm(belongs_to, from = "problem_id", to = "problem_id")]
    pub problem: HasOne<super::problem::Entity>,

    /// NULL for uncategorized comments.
    pub comment_group_id: Option<i32>,
    #[sea_orm(belongs_to, from = "comment_group_id", to = "comment_group_id")]
    pub comment_group: Option<super::comment_group::Entity>,

    pub title: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub body: String,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub created_by: Option<i32>,
    #[sea_orm(belongs_to, relation_enum = "Creator", from = "created_by", to = "user_id")]
    pub creator: HasOne<super::user::Entity>,
    pub updated_by: Option<i32>,
    #[sea_orm(belongs_to, relation_enum = "Updater", from = "updated_by", to = "user_id")]
    pub updater: HasOne<super::user::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
