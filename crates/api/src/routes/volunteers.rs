//! Route definitions for volunteer applications.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::volunteers;
use crate::state::AppState;

/// Routes mounted at `/volunteers`.
///
/// ```text
/// POST / -> create_volunteer
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(volunteers::create_volunteer))
}

/// Routes mounted at `/admin/volunteers`.
///
/// ```text
/// GET    /             -> list_volunteers (?status)
/// GET    /{id}         -> get_volunteer
/// DELETE /{id}         -> delete_volunteer
/// PUT    /{id}/status  -> update_volunteer_status
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(volunteers::list_volunteers))
        .route(
            "/{id}",
            get(volunteers::get_volunteer).delete(volunteers::delete_volunteer),
        )
        .route("/{id}/status", put(volunteers::update_volunteer_status))
}
