//! Impact stories: published ones on the public site, full CRUD for admins.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sadaqah_core::content::{
    resolve_slug, validate_body, validate_slug, validate_title, validate_url,
};
use sadaqah_core::error::CoreError;
use sadaqah_core::forms::validate_optional_text;
use sadaqah_core::types::DbId;
use sadaqah_db::models::story::{CreateStory, UpdateStory};
use sadaqah_db::repositories::StoryRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

const MAX_SUMMARY_LENGTH: usize = 500;

#[derive(Debug, Default, Deserialize)]
pub struct StoryListParams {
    pub published: Option<bool>,
}

/// GET /api/v1/stories
pub async fn list_published(
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let stories = StoryRepo::list(&state.pool, Some(true), page.limit(), page.offset()).await?;
    Ok(Json(DataResponse { data: stories }))
}

/// GET /api/v1/stories/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let story = StoryRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Story '{slug}' not found")))?;
    Ok(Json(DataResponse { data: story }))
}

/// GET /api/v1/admin/stories
pub async fn list_stories(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(filter): Query<StoryListParams>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let stories =
        StoryRepo::list(&state.pool, filter.published, page.limit(), page.offset()).await?;
    Ok(Json(DataResponse { data: stories }))
}

/// POST /api/v1/admin/stories
///
/// The slug is derived from the title when not supplied.
pub async fn create_story(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateStory>,
) -> AppResult<impl IntoResponse> {
    validate_title("title", &input.title)?;
    validate_body("body", &input.body)?;
    validate_optional_text("summary", input.summary.as_deref(), MAX_SUMMARY_LENGTH)?;
    if let Some(url) = &input.image_url {
        validate_url("image_url", url)?;
    }
    let slug = resolve_slug(input.slug.as_deref(), &input.title)?;

    let story = StoryRepo::create(&state.pool, &input, &slug).await?;
    tracing::info!(
        story_id = story.id,
        slug = %story.slug,
        user_id = admin.user_id,
        "Story created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: story })))
}

/// GET /api/v1/admin/stories/{id}
pub async fn get_story(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let story = StoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Story",
            id,
        }))?;
    Ok(Json(DataResponse { data: story }))
}

/// PUT /api/v1/admin/stories/{id}
pub async fn update_story(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStory>,
) -> AppResult<impl IntoResponse> {
    if let Some(title) = &input.title {
        validate_title("title", title)?;
    }
    if let Some(slug) = &input.slug {
        validate_slug(slug)?;
    }
    if let Some(body) = &input.body {
        validate_body("body", body)?;
    }
    validate_optional_text("summary", input.summary.as_deref(), MAX_SUMMARY_LENGTH)?;
    if let Some(url) = &input.image_url {
        validate_url("image_url", url)?;
    }

    let story = StoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Story",
            id,
        }))?;

    tracing::info!(story_id = id, user_id = admin.user_id, "Story updated");
    Ok(Json(DataResponse { data: story }))
}

/// DELETE /api/v1/admin/stories/{id}
pub async fn delete_story(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !StoryRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Story",
            id,
        }));
    }
    tracing::info!(story_id = id, user_id = admin.user_id, "Story deleted");
    Ok(StatusCode::NO_CONTENT)
}
