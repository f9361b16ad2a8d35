//! Route definitions for contact messages.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

/// Routes mounted at `/contact`.
///
/// ```text
/// POST /create -> create_contact
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/create", post(contact::create_contact))
}

/// Routes mounted at `/admin/contacts`.
///
/// ```text
/// GET    /      -> list_contacts (?is_read, limit, offset)
/// GET    /{id}  -> get_contact
/// PUT    /{id}  -> update_contact (read flag)
/// DELETE /{id}  -> delete_contact
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new().route("/", get(contact::list_contacts)).route(
        "/{id}",
        get(contact::get_contact)
            .put(contact::update_contact)
            .delete(contact::delete_contact),
    )
}
