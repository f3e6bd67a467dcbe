pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod routes;
pub mod state;
pub mod utils;

use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as ScalarServable};

use crate::config::CorsConfig;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quizbank API",
        version = "1.0.0",
        description = "Content management API for quiz problems, tags, genres and reviewer comments"
    ),
    paths(
        handlers::health::health,
        handlers::problem::list_problems,
        handlers::problem::create_problem,
        handlers::problem::get_problem,
        handlers::problem::update_problem,
        handlers::problem::delete_problem,
        handlers::comment::list_comments,
        handlers::comment::create_comment,
        handlers::comment::get_comment,
        handlers::comment::update_comment,
        handlers::comment::delete_comment,
        handlers::comment::list_comment_groups,
        handlers::comment::create_comment_group,
        handlers::comment::get_comment_group,
        handlers::comment::update_comment_group,
        handlers::comment::delete_comment_group,
        handlers::tag::list_tag_groups,
        handlers::tag::create_tag_group,
        handlers::tag::get_tag_group,
        handlers::tag::update_tag_group,
        handlers::tag::delete_tag_group,
        handlers::tag::list_tags,
        handlers::tag::create_tag,
        handlers::tag::get_tag,
        handlers::tag::update_tag,
        handlers::tag::delete_tag,
        handlers::genre::list_genres,
        handlers::genre::create_genre,
        handlers::genre::get_genre,
        handlers::genre::update_genre,
        handlers::genre::delete_genre,
    ),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Problems", description = "Problem CRUD with tags and judging criteria"),
        (name = "Comments", description = "Reviewer comments and comment groups"),
        (name = "Tags", description = "Tag groups and tags"),
        (name = "Genres", description = "Problem genres"),
    ),
)]
pub struct ApiDoc;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let cors = cors_layer(&state.config.server.cors);

    routes::api_routes()
        .with_state(state)
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin.trim()).ok())
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(config.max_age))
}
