use axum::routing::post;
use axum::Router;

use crate::handlers::calculators;
use crate::state::AppState;

/// Routes mounted at `/calculators`.
///
/// ```text
/// POST /zakat     -> zakat
/// POST /kaffarah  -> kaffarah
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/zakat", post(calculators::zakat))
        .route("/kaffarah", post(calculators::kaffarah))
}
