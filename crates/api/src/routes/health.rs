use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Both the Stripe secret key and the webhook signing secret are set.
    pub payments_configured: bool,
}

/// GET /health -- service, database and payment configuration health.
///
/// Missing payment credentials do not degrade the service: calculators and
/// content keep working without them.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = sadaqah_db::health_check(&state.pool).await.is_ok();
    let stripe = &state.config.stripe;

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        payments_configured: !stripe.secret_key.is_empty() && !stripe.webhook_secret.is_empty(),
    })
}

/// Mounted at the root, not under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
