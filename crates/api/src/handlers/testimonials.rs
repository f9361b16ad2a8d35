//! Testimonials: public submissions held for moderation, approved ones
//! shown on the site.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sadaqah_core::content::MAX_TITLE_LENGTH;
use sadaqah_core::error::CoreError;
use sadaqah_core::forms::{
    validate_message, validate_name, validate_optional_text, validate_rating,
};
use sadaqah_core::moderation::{self, STATUS_APPROVED};
use sadaqah_core::types::DbId;
use sadaqah_db::models::testimonial::{CreateTestimonial, UpdateTestimonialStatus};
use sadaqah_db::repositories::TestimonialRepo;
use sadaqah_events::bus::TESTIMONIAL_SUBMITTED;
use sadaqah_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{PaginationParams, StatusFilter};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/testimonials
///
/// Stored as `pending` until an admin approves it.
pub async fn submit_testimonial(
    State(state): State<AppState>,
    Json(input): Json<CreateTestimonial>,
) -> AppResult<impl IntoResponse> {
    validate_name(&input.author_name)?;
    validate_optional_text("author_role", input.author_role.as_deref(), MAX_TITLE_LENGTH)?;
    validate_message(&input.content)?;
    if let Some(rating) = input.rating {
        validate_rating(rating)?;
    }

    let testimonial = TestimonialRepo::create(&state.pool, &input).await?;
    tracing::info!(testimonial_id = testimonial.id, "Testimonial submitted");

    state.event_bus.publish(
        PlatformEvent::new(TESTIMONIAL_SUBMITTED)
            .with_entity("testimonials", testimonial.id)
            .with_payload(serde_json::json!({
                "author_name": testimonial.author_name,
                "rating": testimonial.rating,
                "content": testimonial.content,
            })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: testimonial })))
}

/// GET /api/v1/testimonials
pub async fn list_approved(
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let testimonials = TestimonialRepo::list(
        &state.pool,
        Some(STATUS_APPROVED),
        page.limit(),
        page.offset(),
    )
    .await?;
    Ok(Json(DataResponse { data: testimonials }))
}

/// GET /api/v1/admin/testimonials
pub async fn list_testimonials(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(filter): Query<StatusFilter>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(status) = &filter.status {
        moderation::validate_status(status)?;
    }
    let testimonials = TestimonialRepo::list(
        &state.pool,
        filter.status.as_deref(),
        page.limit(),
        page.offset(),
    )
    .await?;
    Ok(Json(DataResponse { data: testimonials }))
}

/// GET /api/v1/admin/testimonials/{id}
pub async fn get_testimonial(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let testimonial = TestimonialRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Testimonial",
            id,
        }))?;
    Ok(Json(DataResponse { data: testimonial }))
}

/// PUT /api/v1/admin/testimonials/{id}/status
pub async fn update_testimonial_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTestimonialStatus>,
) -> AppResult<impl IntoResponse> {
    moderation::validate_status(&input.status)?;

    let testimonial = TestimonialRepo::update_status(&state.pool, id, &input.status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Testimonial",
            id,
        }))?;

    tracing::info!(
        testimonial_id = id,
        status = %testimonial.status,
        user_id = admin.user_id,
        "Testimonial moderated"
    );
    Ok(Json(DataResponse { data: testimonial }))
}

/// DELETE /api/v1/admin/testimonials/{id}
pub async fn delete_testimonial(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !TestimonialRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Testimonial",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
