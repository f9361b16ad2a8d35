//! Route definitions for urgent needs.

use axum::routing::get;
use axum::Router;

use crate::handlers::urgent_needs;
use crate::state::AppState;

/// Routes mounted at `/urgent-needs`.
///
/// ```text
/// GET /        -> list_active
/// GET /{slug}  -> get_by_slug
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(urgent_needs::list_active))
        .route("/{slug}", get(urgent_needs::get_by_slug))
}

/// Routes mounted at `/admin/urgent-needs`.
///
/// ```text
/// GET    /      -> list_urgent_needs (?active)
/// POST   /      -> create_urgent_need
/// GET    /{id}  -> get_urgent_need
/// PUT    /{id}  -> update_urgent_need
/// DELETE /{id}  -> delete_urgent_need
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(urgent_needs::list_urgent_needs).post(urgent_needs::create_urgent_need),
        )
        .route(
            "/{id}",
            get(urgent_needs::get_urgent_need)
                .put(urgent_needs::update_urgent_need)
                .delete(urgent_needs::delete_urgent_need),
        )
}
