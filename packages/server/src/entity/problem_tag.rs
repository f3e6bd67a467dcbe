use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Pure join row between a problem and a tag.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "problem_tag")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub problem_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub tag_id: i32,
    #[sea_orm(belongs_to, from = "problem_id", to = "problem_id")]
    pub problem: Option<super::problem::Entity>,
    #[sea_orm(belongs_to, from = "tag_id", to = "tag_id")]
    pub tag: Option<super::tag::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
