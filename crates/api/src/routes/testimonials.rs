//! Route definitions for testimonials.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::testimonials;
use crate::state::AppState;

/// Routes mounted at `/testimonials`.
///
/// ```text
/// GET  / -> list_approved
/// POST / -> submit_testimonial
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(testimonials::list_approved).post(testimonials::submit_testimonial),
    )
}

/// Routes mounted at `/admin/testimonials`.
///
/// ```text
/// GET    /             -> list_testimonials (?status)
/// GET    /{id}         -> get_testimonial
/// DELETE /{id}         -> delete_testimonial
/// PUT    /{id}/status  -> update_testimonial_status
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(testimonials::list_testimonials))
        .route(
            "/{id}",
            get(testimonials::get_testimonial).delete(testimonials::delete_testimonial),
        )
        .route("/{id}/status", put(testimonials::update_testimonial_status))
}
