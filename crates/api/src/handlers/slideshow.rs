//! Homepage slideshow.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sadaqah_core::content::{validate_url, MAX_TITLE_LENGTH};
use sadaqah_core::error::CoreError;
use sadaqah_core::forms::validate_optional_text;
use sadaqah_core::types::DbId;
use sadaqah_db::models::slideshow::{CreateSlide, ReorderSlides, UpdateSlide};
use sadaqah_db::repositories::SlideshowRepo;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn validate_slide_text(title: Option<&str>, subtitle: Option<&str>) -> Result<(), CoreError> {
    validate_optional_text("title", title, MAX_TITLE_LENGTH)?;
    validate_optional_text("subtitle", subtitle, MAX_TITLE_LENGTH)
}

/// GET /api/v1/slideshow
pub async fn list_active(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let slides = SlideshowRepo::list(&state.pool, true).await?;
    Ok(Json(DataResponse { data: slides }))
}

/// GET /api/v1/admin/slideshow
pub async fn list_slides(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let slides = SlideshowRepo::list(&state.pool, false).await?;
    Ok(Json(DataResponse { data: slides }))
}

/// POST /api/v1/admin/slideshow
///
/// Appended after the last slide unless `sort_order` is given.
pub async fn create_slide(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateSlide>,
) -> AppResult<impl IntoResponse> {
    validate_slide_text(input.title.as_deref(), input.subtitle.as_deref())?;
    validate_url("image_url", &input.image_url)?;
    if let Some(link) = &input.link_url {
        validate_url("link_url", link)?;
    }

    let slide = SlideshowRepo::create(&state.pool, &input).await?;
    tracing::info!(slide_id = slide.id, user_id = admin.user_id, "Slide created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: slide })))
}

/// GET /api/v1/admin/slideshow/{id}
pub async fn get_slide(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let slide = SlideshowRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Slide",
            id,
        }))?;
    Ok(Json(DataResponse { data: slide }))
}

/// PUT /api/v1/admin/slideshow/{id}
pub async fn update_slide(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSlide>,
) -> AppResult<impl IntoResponse> {
    validate_slide_text(input.title.as_deref(), input.subtitle.as_deref())?;
    if let Some(url) = &input.image_url {
        validate_url("image_url", url)?;
    }
    if let Some(link) = &input.link_url {
        validate_url("link_url", link)?;
    }

    let slide = SlideshowRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Slide",
            id,
        }))?;
    Ok(Json(DataResponse { data: slide }))
}

/// PUT /api/v1/admin/slideshow/reorder
///
/// `slide_ids` in display order; each slide's `sort_order` becomes its index.
pub async fn reorder_slides(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<ReorderSlides>,
) -> AppResult<impl IntoResponse> {
    if input.slide_ids.is_empty() {
        return Err(AppError::BadRequest("slide_ids must not be empty".into()));
    }

    let updated = SlideshowRepo::reorder(&state.pool, &input.slide_ids).await?;
    tracing::info!(updated, user_id = admin.user_id, "Slides reordered");
    Ok(Json(DataResponse {
        data: json!({ "updated": updated }),
    }))
}

/// DELETE /api/v1/admin/slideshow/{id}
pub async fn delete_slide(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !SlideshowRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Slide",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
