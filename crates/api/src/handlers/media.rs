//! Media gallery (images and videos referenced by URL).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sadaqah_core::content::{validate_media_type, validate_title, validate_url};
use sadaqah_core::error::CoreError;
use sadaqah_core::forms::{validate_optional_text, MAX_MESSAGE_LENGTH};
use sadaqah_core::types::DbId;
use sadaqah_db::models::media::{CreateMediaItem, UpdateMediaItem};
use sadaqah_db::repositories::MediaRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct MediaListParams {
    pub media_type: Option<String>,
}

impl MediaListParams {
    fn validated(&self) -> Result<Option<&str>, CoreError> {
        if let Some(media_type) = &self.media_type {
            validate_media_type(media_type)?;
        }
        Ok(self.media_type.as_deref())
    }
}

/// GET /api/v1/media
pub async fn list_public(
    State(state): State<AppState>,
    Query(filter): Query<MediaListParams>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let items =
        MediaRepo::list(&state.pool, filter.validated()?, page.limit(), page.offset()).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/admin/media
pub async fn list_media(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(filter): Query<MediaListParams>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let items =
        MediaRepo::list(&state.pool, filter.validated()?, page.limit(), page.offset()).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/admin/media
pub async fn create_media(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateMediaItem>,
) -> AppResult<impl IntoResponse> {
    validate_title("title", &input.title)?;
    validate_media_type(&input.media_type)?;
    validate_url("url", &input.url)?;
    if let Some(thumb) = &input.thumbnail_url {
        validate_url("thumbnail_url", thumb)?;
    }
    validate_optional_text("description", input.description.as_deref(), MAX_MESSAGE_LENGTH)?;

    let item = MediaRepo::create(&state.pool, &input).await?;
    tracing::info!(
        media_id = item.id,
        media_type = %item.media_type,
        user_id = admin.user_id,
        "Media item created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// GET /api/v1/admin/media/{id}
pub async fn get_media(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = MediaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MediaItem",
            id,
        }))?;
    Ok(Json(DataResponse { data: item }))
}

/// PUT /api/v1/admin/media/{id}
pub async fn update_media(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMediaItem>,
) -> AppResult<impl IntoResponse> {
    if let Some(title) = &input.title {
        validate_title("title", title)?;
    }
    if let Some(media_type) = &input.media_type {
        validate_media_type(media_type)?;
    }
    if let Some(url) = &input.url {
        validate_url("url", url)?;
    }
    if let Some(thumb) = &input.thumbnail_url {
        validate_url("thumbnail_url", thumb)?;
    }
    validate_optional_text("description", input.description.as_deref(), MAX_MESSAGE_LENGTH)?;

    let item = MediaRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MediaItem",
            id,
        }))?;
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/admin/media/{id}
pub async fn delete_media(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !MediaRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "MediaItem",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
