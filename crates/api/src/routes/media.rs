//! Route definitions for the media gallery.

use axum::routing::get;
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

/// Routes mounted at `/media`.
///
/// ```text
/// GET / -> list_public (?media_type)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(media::list_public))
}

/// Routes mounted at `/admin/media`.
///
/// ```text
/// GET    /      -> list_media (?media_type)
/// POST   /      -> create_media
/// GET    /{id}  -> get_media
/// PUT    /{id}  -> update_media
/// DELETE /{id}  -> delete_media
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(media::list_media).post(media::create_media))
        .route(
            "/{id}",
            get(media::get_media)
                .put(media::update_media)
                .delete(media::delete_media),
        )
}
