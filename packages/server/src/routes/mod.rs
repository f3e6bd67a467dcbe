use axum::{Router, routing::get};

use crate::handlers;
use crate::state::AppState;

/// Every route of the service. Collection paths are served both with and
/// without the trailing slash.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .merge(problem_routes())
        .merge(comment_routes())
        .merge(tag_routes())
        .merge(genre_routes())
}

fn problem_routes() -> Router<AppState> {
    let collection =
        get(handlers::problem::list_problems).post(handlers::problem::create_problem);
    let comments =
        get(handlers::comment::list_comments).post(handlers::comment::create_comment);

    Router::new()
        .route("/problems/", collection.clone())
        .route("/problems", collection)
        .route(
            "/problems/{id}",
            get(handlers::problem::get_problem)
                .put(handlers::problem::update_problem)
                .delete(handlers::problem::delete_problem),
        )
        .route("/problems/{id}/comments/", comments.clone())
        .route("/problems/{id}/comments", comments)
}

fn comment_routes() -> Router<AppState> {
    let groups = get(handlers::comment::list_comment_groups)
        .post(handlers::comment::create_comment_group);

    Router::new()
        .route(
            "/comments/{id}",
            get(handlers::comment::get_comment)
                .put(handlers::comment::update_comment)
                .delete(handlers::comment::delete_comment),
        )
        .route("/comment-groups/", groups.clone())
        .route("/comment-groups", groups)
        .route(
            "/comment-groups/{id}",
            get(handlers::comment::get_comment_group)
                .put(handlers::comment::update_comment_group)
                .delete(handlers::comment::delete_comment_group),
        )
}

fn tag_routes() -> Router<AppState> {
    let groups = get(handlers::tag::list_tag_groups).post(handlers::tag::create_tag_group);
    let tags = get(handlers::tag::list_tags).post(handlers::tag::create_tag);

    Router::new()
        .route("/tag-groups/", groups.clone())
        .route("/tag-groups", groups)
        .route(
            "/tag-groups/{id}",
            get(handlers::tag::get_tag_group)
                .put(handlers::tag::update_tag_group)
                .delete(handlers::tag::delete_tag_group),
        )
        .route("/tag-groups/{id}/tags/", tags.clone())
        .route("/tag-groups/{id}/tags", tags)
        .route(
            "/tags/{id}",
            get(handlers::tag::get_tag)
                .put(handlers::tag::update_tag)
                .delete(handlers::tag::delete_tag),
        )
}

fn genre_routes() -> Router<AppState> {
    let collection = get(handlers::genre::list_genres).post(handlers::genre::create_genre);

    Router::new()
        .route("/genres/", collection.clone())
        .route("/genres", collection)
        .route(
            "/genres/{id}",
            get(handlers::genre::get_genre)
                .put(handlers::genre::update_genre)
                .delete(handlers::genre::delete_genre),
        )
}
