use std::collections::{BTreeSet, HashMap};

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use sea_orm::*;
use tracing::{info, instrument};

use crate::entity::{comment, judging_criteria, problem, problem_tag};
use crate::error::{AppError, EmptyBody, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::params::{AppPath, AppQuery};
use crate::models::problem::*;
use crate::state::AppState;
use crate::utils::lookup::{ensure_tags_exist, find_genre, find_problem};
use crate::utils::problem_query::build_problem_query;

#[utoipa::path(
    get,
    path = "/problems/",
    tag = "Problems",
    operation_id = "listProblems",
    summary = "List problems with optional filters and sorting",
    description = "Returns every matching problem (no pagination). Filters on `genre_id`, `tag_id` (any of the listed tags) and `keyword` (case-insensitive substring of the problem text) are combined with AND. `order_by` takes comma-separated field names; unknown names are ignored. Ties are broken by `problem_id`.",
    params(ProblemListQuery),
    responses(
        (status = 200, description = "Matching problems", body = Vec<ProblemResponse>),
        (status = 422, description = "Malformed query string", body = EmptyBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_problems(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ProblemListQuery>,
) -> Result<Json<Vec<ProblemResponse>>, AppError> {
    let problems = build_problem_query(&query).all(&state.db).await?;
    let data = load_problem_responses(&state.db, problems).await?;
    Ok(Json(data))
}

#[utoipa::path(
    post,
    path = "/problems/",
    tag = "Problems",
    operation_id = "createProblem",
    summary = "Create a new problem",
    description = "Creates a problem together with its judging criteria and tag associations in one transaction.",
    request_body = CreateProblemRequest,
    responses(
        (status = 200, description = "Problem created", body = ProblemResponse),
        (status = 404, description = "Referenced genre or tag not found (NOT_FOUND)", body = ErrorBody),
        (status = 422, description = "Validation error", body = EmptyBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_problem(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateProblemRequest>,
) -> Result<Json<ProblemResponse>, AppError> {
    validate_create_problem(&payload)?;
    let tag_ids = unique_ids(&payload.tags);

    let txn = state.db.begin().await?;

    if let Some(genre_id) = payload.genre_id {
        find_genre(&txn, genre_id).await?;
    }
    ensure_tags_exist(&txn, &tag_ids).await?;

    let now = Utc::now();
    let new_problem = problem::ActiveModel {
        problem_text: Set(payload.problem_text),
        answer: Set(payload.answer),
        original_text: Set(payload.original_text),
        genre_id: Set(payload.genre_id),
        sort_order: Set(payload.sort_order),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let model = new_problem.insert(&txn).await?;

    insert_criteria(&txn, model.problem_id, payload.judging_criteria, now).await?;
    insert_tag_links(&txn, model.problem_id, &tag_ids).await?;

    txn.commit().await?;
    info!(problem_id = model.problem_id, "Problem created");

    Ok(Json(load_problem_response(&state.db, model).await?))
}

#[utoipa::path(
    get,
    path = "/problems/{id}",
    tag = "Problems",
    operation_id = "getProblem",
    summary = "Get a problem by ID",
    params(("id" = i32, Path, description = "Problem ID")),
    responses(
        (status = 200, description = "Problem details", body = ProblemResponse),
        (status = 404, description = "Problem not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_problem(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<ProblemResponse>, AppError> {
    let model = find_problem(&state.db, id).await?;
    Ok(Json(load_problem_response(&state.db, model).await?))
}

#[utoipa::path(
    put,
    path = "/problems/{id}",
    tag = "Problems",
    operation_id = "updateProblem",
    summary = "Update an existing problem",
    description = "Only provided fields are modified. `tags` replaces the tag set. `judging_criteria` entries are appended as new criteria; existing criteria are never removed by this operation.",
    params(("id" = i32, Path, description = "Problem ID")),
    request_body = UpdateProblemRequest,
    responses(
        (status = 200, description = "Problem updated", body = ProblemResponse),
        (status = 404, description = "Problem, genre or tag not found (NOT_FOUND)", body = ErrorBody),
        (status = 422, description = "Validation error", body = EmptyBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_problem(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateProblemRequest>,
) -> Result<Json<ProblemResponse>, AppError> {
    validate_update_problem(&payload)?;

    if payload == UpdateProblemRequest::default() {
        let existing = find_problem(&state.db, id).await?;
        return Ok(Json(load_problem_response(&state.db, existing).await?));
    }

    let txn = state.db.begin().await?;

    let existing = find_problem(&txn, id).await?;
    let mut active: problem::ActiveModel = existing.into();

    if let Some(text) = payload.problem_text {
        active.problem_text = Set(text);
    }
    if let Some(answer) = payload.answer {
        active.answer = Set(answer);
    }
    if let Some(original_text) = payload.original_text {
        active.original_text = Set(original_text);
    }
    match payload.genre_id {
        Some(Some(genre_id)) => {
            find_genre(&txn, genre_id).await?;
            active.genre_id = Set(Some(genre_id));
        }
        Some(None) => active.genre_id = Set(None),
        None => {}
    }
    if let Some(sort_order) = payload.sort_order {
        active.sort_order = Set(sort_order);
    }
    let now = Utc::now();
    active.updated_at = Set(now);

    let model = active.update(&txn).await?;

    if let Some(tags) = payload.tags {
        let tag_ids = unique_ids(&tags);
        ensure_tags_exist(&txn, &tag_ids).await?;
        problem_tag::Entity::delete_many()
            .filter(problem_tag::Column::ProblemId.eq(id))
            .exec(&txn)
            .await?;
        insert_tag_links(&txn, id, &tag_ids).await?;
    }
    if let Some(criteria) = payload.judging_criteria {
        insert_criteria(&txn, id, criteria, now).await?;
    }

    txn.commit().await?;

    Ok(Json(load_problem_response(&state.db, model).await?))
}

#[utoipa::path(
    delete,
    path = "/problems/{id}",
    tag = "Problems",
    operation_id = "deleteProblem",
    summary = "Delete a problem by ID",
    description = "Permanently deletes a problem along with its judging criteria, comments and tag associations.",
    params(("id" = i32, Path, description = "Problem ID")),
    responses(
        (status = 204, description = "Problem deleted"),
        (status = 404, description = "Problem not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_problem(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;

    find_problem(&txn, id).await?;

    judging_criteria::Entity::delete_many()
        .filter(judging_criteria::Column::ProblemId.eq(id))
        .exec(&txn)
        .await?;
    comment::Entity::delete_many()
        .filter(comment::Column::ProblemId.eq(id))
        .exec(&txn)
        .await?;
    problem_tag::Entity::delete_many()
        .filter(problem_tag::Column::ProblemId.eq(id))
        .exec(&txn)
        .await?;
    problem::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    info!(problem_id = id, "Problem deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Sorted, de-duplicated copy of a client-supplied id list.
fn unique_ids(ids: &[i32]) -> Vec<i32> {
    ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
}

async fn insert_criteria(
    txn: &DatabaseTransaction,
    problem_id: i32,
    criteria: Vec<JudgingCriteriaCreate>,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    for c in criteria {
        let row = judging_criteria::ActiveModel {
            problem_id: Set(problem_id),
            criteria_type: Set(c.criteria_type),
            criteria_text: Set(c.criteria_text),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        row.insert(txn).await?;
    }
    Ok(())
}

async fn insert_tag_links(
    txn: &DatabaseTransaction,
    problem_id: i32,
    tag_ids: &[i32],
) -> Result<(), AppError> {
    for &tag_id in tag_ids {
        let link = problem_tag::ActiveModel {
            problem_id: Set(problem_id),
            tag_id: Set(tag_id),
        };
        problem_tag::Entity::insert(link)
            .exec_without_returning(txn)
            .await?;
    }
    Ok(())
}

async fn load_problem_response<C: ConnectionTrait>(
    db: &C,
    model: problem::Model,
) -> Result<ProblemResponse, AppError> {
    let mut responses = load_problem_responses(db, vec![model]).await?;
    responses
        .pop()
        .ok_or_else(|| AppError::Internal("problem vanished while loading relations".into()))
}

/// Attach tag ids and judging criteria to each problem, preserving the input
/// order. Runs one query per relation regardless of the number of problems.
async fn load_problem_responses<C: ConnectionTrait>(
    db: &C,
    problems: Vec<problem::Model>,
) -> Result<Vec<ProblemResponse>, AppError> {
    if problems.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i32> = problems.iter().map(|p| p.problem_id).collect();

    let links = problem_tag::Entity::find()
        .filter(problem_tag::Column::ProblemId.is_in(ids.iter().copied()))
        .order_by_asc(problem_tag::Column::TagId)
        .all(db)
        .await?;
    let criteria = judging_criteria::Entity::find()
        .filter(judging_criteria::Column::ProblemId.is_in(ids.iter().copied()))
        .order_by_asc(judging_criteria::Column::CriteriaId)
        .all(db)
        .await?;

    let mut tags_by_problem: HashMap<i32, Vec<i32>> = HashMap::new();
    for link in links {
        tags_by_problem
            .entry(link.problem_id)
            .or_default()
            .push(link.tag_id);
    }
    let mut criteria_by_problem: HashMap<i32, Vec<JudgingCriteriaResponse>> = HashMap::new();
    for c in criteria {
        criteria_by_problem
            .entry(c.problem_id)
            .or_default()
            .push(c.into());
    }

    Ok(problems
        .into_iter()
        .map(|p| {
            let id = p.problem_id;
            ProblemResponse::new(
                p,
                tags_by_problem.remove(&id).unwrap_or_default(),
                criteria_by_problem.remove(&id).unwrap_or_default(),
            )
        })
        .collect())
}
