use sea_orm::prelude::Expr;
use sea_orm::sea_query::{NullOrdering, Query as SeaQuery};
use sea_orm::{ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder, Select};

use crate::entity::{problem, problem_tag};
use crate::models::problem::ProblemListQuery;
use crate::models::shared::escape_like;

/// Smallest tag name attached to the outer problem row. Problems without tags
/// yield NULL and are placed last in either direction.
const TAG_NAME_SORT_SQL: &str = "(SELECT MIN(tag.tag_name) FROM tag \
     INNER JOIN problem_tag ON problem_tag.tag_id = tag.tag_id \
     WHERE problem_tag.problem_id = problem.problem_id)";

/// Both sides go through the database's `LOWER` so the column and the
/// pattern are folded by the same rules.
const KEYWORD_MATCH_SQL: &str =
    r#"LOWER("problem"."problem_text") LIKE LOWER(?) ESCAPE '\'"#;

/// A resolved `order_by` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    ProblemId,
    ProblemText,
    Answer,
    OriginalText,
    GenreId,
    SortOrder,
    CreatedAt,
    UpdatedAt,
    CreatedBy,
    UpdatedBy,
    /// Any tag-only field name sorts by the problem's tag name.
    TagName,
}

impl SortKey {
    /// Resolve a field name. Problem fields win over tag fields of the same
    /// name (`sort_order`, `created_at`, ...). Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        let key = match name {
            "problem_id" => SortKey::ProblemId,
            "problem_text" => SortKey::ProblemText,
            "answer" => SortKey::Answer,
            "original_text" => SortKey::OriginalText,
            "genre_id" => SortKey::GenreId,
            "sort_order" => SortKey::SortOrder,
            "created_at" => SortKey::CreatedAt,
            "updated_at" => SortKey::UpdatedAt,
            "created_by" => SortKey::CreatedBy,
            "updated_by" => SortKey::UpdatedBy,
            "tag_id" | "tag_group_id" | "tag_name" => SortKey::TagName,
            _ => return None,
        };
        Some(key)
    }

    fn column(self) -> Option<problem::Column> {
        let col = match self {
            SortKey::ProblemId => problem::Column::ProblemId,
            SortKey::ProblemText => problem::Column::ProblemText,
            SortKey::Answer => problem::Column::Answer,
            SortKey::OriginalText => problem::Column::OriginalText,
            SortKey::GenreId => problem::Column::GenreId,
            SortKey::SortOrder => problem::Column::SortOrder,
            SortKey::CreatedAt => problem::Column::CreatedAt,
            SortKey::UpdatedAt => problem::Column::UpdatedAt,
            SortKey::CreatedBy => problem::Column::CreatedBy,
            SortKey::UpdatedBy => problem::Column::UpdatedBy,
            SortKey::TagName => return None,
        };
        Some(col)
    }

    fn apply(self, select: Select<problem::Entity>, order: Order) -> Select<problem::Entity> {
        match self.column() {
            Some(col) => select.order_by(col, order),
            None => select.order_by_with_nulls(
                Expr::cust(TAG_NAME_SORT_SQL),
                order,
                NullOrdering::Last,
            ),
        }
    }
}

/// Split a comma-separated `order_by` value, dropping unrecognized names.
pub fn parse_sort_keys(order_by: &str) -> Vec<SortKey> {
    order_by
        .split(',')
        .filter_map(|name| SortKey::parse(name.trim()))
        .collect()
}

/// Exactly `DESC` reverses every key; anything else sorts ascending.
pub fn parse_order_dir(order_dir: Option<&str>) -> Order {
    match order_dir {
        Some("DESC") => Order::Desc,
        _ => Order::Asc,
    }
}

/// Build the listing query for `GET /problems/`.
///
/// Filters are ANDed together. Empty `tag_id`, empty `keyword` and a zero
/// `genre_id` all count as "not provided". The result is always ordered by
/// `problem_id` last so repeated calls return rows in the same order.
pub fn build_problem_query(query: &ProblemListQuery) -> Select<problem::Entity> {
    let mut select = problem::Entity::find();

    if let Some(genre_id) = query.genre_id.filter(|id| *id != 0) {
        select = select.filter(problem::Column::GenreId.eq(genre_id));
    }

    if !query.tag_id.is_empty() {
        select = select.filter(
            problem::Column::ProblemId.in_subquery(
                SeaQuery::select()
                    .column(problem_tag::Column::ProblemId)
                    .from(problem_tag::Entity)
                    .and_where(problem_tag::Column::TagId.is_in(query.tag_id.iter().copied()))
                    .to_owned(),
            ),
        );
    }

    if let Some(keyword) = query.keyword.as_deref().filter(|k| !k.is_empty()) {
        let pattern = format!("%{}%", escape_like(keyword));
        select = select.filter(Expr::cust_with_values(KEYWORD_MATCH_SQL, [pattern]));
    }

    let order = parse_order_dir(query.order_dir.as_deref());
    if let Some(ref order_by) = query.order_by {
        for key in parse_sort_keys(order_by) {
            select = key.apply(select, order.clone());
        }
    }

    select.order_by_asc(problem::Column::ProblemId)
}
