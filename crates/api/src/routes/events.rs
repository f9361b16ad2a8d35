//! Route definitions for community events.

use axum::routing::get;
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

/// Routes mounted at `/events`.
///
/// ```text
/// GET / -> list_public (?upcoming)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(events::list_public))
}

/// Routes mounted at `/admin/events`.
///
/// ```text
/// GET    /      -> list_events (?upcoming)
/// POST   /      -> create_event
/// GET    /{id}  -> get_event
/// PUT    /{id}  -> update_event
/// DELETE /{id}  -> delete_event
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(events::list_events).post(events::create_event))
        .route(
            "/{id}",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
}
