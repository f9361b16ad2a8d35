//! Route definitions for stories.

use axum::routing::get;
use axum::Router;

use crate::handlers::stories;
use crate::state::AppState;

/// Routes mounted at `/stories`.
///
/// ```text
/// GET /        -> list_published
/// GET /{slug}  -> get_by_slug
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(stories::list_published))
        .route("/{slug}", get(stories::get_by_slug))
}

/// Routes mounted at `/admin/stories`.
///
/// ```text
/// GET    /      -> list_stories (?published)
/// POST   /      -> create_story
/// GET    /{id}  -> get_story
/// PUT    /{id}  -> update_story
/// DELETE /{id}  -> delete_story
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(stories::list_stories).post(stories::create_story))
        .route(
            "/{id}",
            get(stories::get_story)
                .put(stories::update_story)
                .delete(stories::delete_story),
        )
}
