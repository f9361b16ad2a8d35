//! Route definitions for the homepage slideshow.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::slideshow;
use crate::state::AppState;

/// Routes mounted at `/slideshow`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(slideshow::list_active))
}

/// Routes mounted at `/admin/slideshow`.
///
/// ```text
/// GET    /          -> list_slides
/// POST   /          -> create_slide
/// PUT    /reorder   -> reorder_slides
/// GET    /{id}      -> get_slide
/// PUT    /{id}      -> update_slide
/// DELETE /{id}      -> delete_slide
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(slideshow::list_slides).post(slideshow::create_slide))
        .route("/reorder", put(slideshow::reorder_slides))
        .route(
            "/{id}",
            get(slideshow::get_slide)
                .put(slideshow::update_slide)
                .delete(slideshow::delete_slide),
        )
}
