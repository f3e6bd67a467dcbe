use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "problem")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub problem_id: i32,

    #[sea_orm(column_type = "Text")]
    pub problem_text: String,
    #[sea_orm(column_type = "Text")]
    pub answer: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub original_text: Option<String>,

    /// NULL for problems outside any genre.
    pub genre_id: Option<i32>,
    #[sea_orm(belongs_to, from = "genre_id", to = "genre_id")]
    pub genre: Option<super::genre::Entity>,

    pub sort_order: Option<i32>,

    #[sea_orm(has_many, via = "problem_tag")]
    pub tags: HasMany<super::tag::Entity>,

    #[sea_orm(has_many)]
    pub comments: HasMany<super::comment::Entity>,

    #[sea_orm(has_many)]
    pub judging_criteria: HasMany<super::judging_criteria::Entity>,

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
