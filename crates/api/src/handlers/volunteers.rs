//! Volunteer applications (public submit, admin review).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sadaqah_core::content::MAX_TITLE_LENGTH;
use sadaqah_core::error::CoreError;
use sadaqah_core::forms::{
    normalize_email, validate_email, validate_name, validate_optional_text, MAX_MESSAGE_LENGTH,
};
use sadaqah_core::moderation;
use sadaqah_core::types::DbId;
use sadaqah_db::models::volunteer::{CreateVolunteer, UpdateVolunteerStatus};
use sadaqah_db::repositories::VolunteerRepo;
use sadaqah_events::bus::VOLUNTEER_SUBMITTED;
use sadaqah_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{PaginationParams, StatusFilter};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/volunteers
pub async fn create_volunteer(
    State(state): State<AppState>,
    Json(mut input): Json<CreateVolunteer>,
) -> AppResult<impl IntoResponse> {
    input.email = normalize_email(&input.email);
    validate_name(&input.full_name)?;
    validate_email(&input.email)?;
    validate_optional_text("phone", input.phone.as_deref(), 40)?;
    validate_optional_text("interests", input.interests.as_deref(), MAX_TITLE_LENGTH)?;
    validate_optional_text("availability", input.availability.as_deref(), MAX_TITLE_LENGTH)?;
    validate_optional_text("message", input.message.as_deref(), MAX_MESSAGE_LENGTH)?;

    let volunteer = VolunteerRepo::create(&state.pool, &input).await?;
    tracing::info!(volunteer_id = volunteer.id, "Volunteer application received");

    state.event_bus.publish(
        PlatformEvent::new(VOLUNTEER_SUBMITTED)
            .with_entity("volunteers", volunteer.id)
            .with_payload(serde_json::json!({
                "full_name": volunteer.full_name,
                "email": volunteer.email,
                "interests": volunteer.interests,
            })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: volunteer })))
}

/// GET /api/v1/admin/volunteers
pub async fn list_volunteers(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(filter): Query<StatusFilter>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(status) = &filter.status {
        moderation::validate_status(status)?;
    }
    let volunteers = VolunteerRepo::list(
        &state.pool,
        filter.status.as_deref(),
        page.limit(),
        page.offset(),
    )
    .await?;
    Ok(Json(DataResponse { data: volunteers }))
}

/// GET /api/v1/admin/volunteers/{id}
pub async fn get_volunteer(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let volunteer = VolunteerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Volunteer",
            id,
        }))?;
    Ok(Json(DataResponse { data: volunteer }))
}

/// PUT /api/v1/admin/volunteers/{id}/status
pub async fn update_volunteer_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateVolunteerStatus>,
) -> AppResult<impl IntoResponse> {
    moderation::validate_status(&input.status)?;

    let volunteer = VolunteerRepo::update_status(&state.pool, id, &input.status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Volunteer",
            id,
        }))?;

    tracing::info!(
        volunteer_id = id,
        status = %volunteer.status,
        user_id = admin.user_id,
        "Volunteer status updated"
    );
    Ok(Json(DataResponse { data: volunteer }))
}

/// DELETE /api/v1/admin/volunteers/{id}
pub async fn delete_volunteer(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !VolunteerRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Volunteer",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
