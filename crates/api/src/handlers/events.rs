//! Community events.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sadaqah_core::content::{validate_body, validate_title, validate_url, MAX_TITLE_LENGTH};
use sadaqah_core::error::CoreError;
use sadaqah_core::forms::validate_optional_text;
use sadaqah_core::types::{DbId, Timestamp};
use sadaqah_db::models::event::{CreateEvent, UpdateEvent};
use sadaqah_db::repositories::event_repo::EventListFilter;
use sadaqah_db::repositories::EventRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct EventListParams {
    #[serde(default)]
    pub upcoming: bool,
}

fn validate_schedule(starts_at: Timestamp, ends_at: Option<Timestamp>) -> Result<(), CoreError> {
    match ends_at {
        Some(end) if end < starts_at => Err(CoreError::Validation(
            "ends_at must not be before starts_at".to_string(),
        )),
        _ => Ok(()),
    }
}

/// GET /api/v1/events
pub async fn list_public(
    State(state): State<AppState>,
    Query(params): Query<EventListParams>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let filter = EventListFilter {
        upcoming_only: params.upcoming,
        published_only: true,
    };
    let events = EventRepo::list(&state.pool, filter, page.limit(), page.offset()).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /api/v1/admin/events
pub async fn list_events(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<EventListParams>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let filter = EventListFilter {
        upcoming_only: params.upcoming,
        published_only: false,
    };
    let events = EventRepo::list(&state.pool, filter, page.limit(), page.offset()).await?;
    Ok(Json(DataResponse { data: events }))
}

/// POST /api/v1/admin/events
pub async fn create_event(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateEvent>,
) -> AppResult<impl IntoResponse> {
    validate_title("title", &input.title)?;
    validate_body("description", &input.description)?;
    validate_optional_text("location", input.location.as_deref(), MAX_TITLE_LENGTH)?;
    validate_schedule(input.starts_at, input.ends_at)?;
    if let Some(url) = &input.image_url {
        validate_url("image_url", url)?;
    }

    let event = EventRepo::create(&state.pool, &input).await?;
    tracing::info!(event_id = event.id, user_id = admin.user_id, "Event created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// GET /api/v1/admin/events/{id}
pub async fn get_event(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id,
        }))?;
    Ok(Json(DataResponse { data: event }))
}

/// PUT /api/v1/admin/events/{id}
///
/// The schedule is checked against the stored row so a partial update can
/// not leave an event ending before it starts.
pub async fn update_event(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEvent>,
) -> AppResult<impl IntoResponse> {
    if let Some(title) = &input.title {
        validate_title("title", title)?;
    }
    if let Some(description) = &input.description {
        validate_body("description", description)?;
    }
    validate_optional_text("location", input.location.as_deref(), MAX_TITLE_LENGTH)?;
    if let Some(url) = &input.image_url {
        validate_url("image_url", url)?;
    }

    let existing = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id,
        }))?;
    validate_schedule(
        input.starts_at.unwrap_or(existing.starts_at),
        input.ends_at.or(existing.ends_at),
    )?;

    let event = EventRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id,
        }))?;

    tracing::info!(event_id = id, user_id = admin.user_id, "Event updated");
    Ok(Json(DataResponse { data: event }))
}

/// DELETE /api/v1/admin/events/{id}
pub async fn delete_event(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !EventRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id,
        }));
    }
    tracing::info!(event_id = id, user_id = admin.user_id, "Event deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn schedule_rejects_end_before_start() {
        let start = Utc::now();
        assert!(validate_schedule(start, None).is_ok());
        assert!(validate_schedule(start, Some(start + Duration::hours(2))).is_ok());
        assert!(validate_schedule(start, Some(start - Duration::minutes(1))).is_err());
    }
}
