//! Route definitions for donations and the payment webhook.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{donations, webhook};
use crate::state::AppState;

/// Routes mounted at `/donations`.
///
/// ```text
/// POST /create-payment-intent    -> create_payment_intent
/// POST /create-checkout-session  -> create_checkout_session
/// POST /webhook                  -> stripe_webhook (signature verified)
/// GET  /mine                     -> my_donations (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/create-payment-intent",
            post(donations::create_payment_intent),
        )
        .route(
            "/create-checkout-session",
            post(donations::create_checkout_session),
        )
        .route("/webhook", post(webhook::stripe_webhook))
        .route("/mine", get(donations::my_donations))
}

/// Routes mounted at `/admin/donations`.
///
/// ```text
/// GET    /             -> list_donations (?status, frequency)
/// GET    /{id}         -> get_donation
/// DELETE /{id}         -> delete_donation
/// PUT    /{id}/status  -> update_donation_status
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(donations::list_donations))
        .route(
            "/{id}",
            get(donations::get_donation).delete(donations::delete_donation),
        )
        .route("/{id}/status", put(donations::update_donation_status))
}
