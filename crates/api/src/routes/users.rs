//! Route definitions for admin user management.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/admin/users`.
///
/// All routes require the `admin` role (enforced by handler extractors).
///
/// ```text
/// GET    /      -> list_users (?role)
/// GET    /{id}  -> get_user
/// PUT    /{id}  -> update_user
/// DELETE /{id}  -> deactivate_user
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new().route("/", get(users::list_users)).route(
        "/{id}",
        get(users::get_user)
            .put(users::update_user)
            .delete(users::deactivate_user),
    )
}
