use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "comment_group")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub comment_group_id: i32,

    pub group_name: String,

    #[sea_orm(has_many)]
    pub comments: HasMany<super::comment::Entity>,

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
