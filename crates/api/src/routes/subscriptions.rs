//! Route definitions for recurring donation subscriptions.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::subscriptions;
use crate::state::AppState;

/// Routes mounted at `/subscriptions`.
///
/// ```text
/// GET /mine -> my_subscriptions (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/mine", get(subscriptions::my_subscriptions))
}

/// Routes mounted at `/admin/subscriptions`.
///
/// ```text
/// GET  /             -> list_subscriptions (?status)
/// GET  /{id}         -> get_subscription
/// POST /{id}/cancel  -> cancel_subscription
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(subscriptions::list_subscriptions))
        .route("/{id}", get(subscriptions::get_subscription))
        .route("/{id}/cancel", post(subscriptions::cancel_subscription))
}
