//! Contact form submissions (public create, admin inbox).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sadaqah_core::error::CoreError;
use sadaqah_core::forms::{
    normalize_email, validate_email, validate_message, validate_name, validate_optional_text,
};
use sadaqah_core::content::MAX_TITLE_LENGTH;
use sadaqah_core::types::DbId;
use sadaqah_db::models::contact::{CreateContact, UpdateContactRead};
use sadaqah_db::repositories::ContactRepo;
use sadaqah_events::bus::CONTACT_SUBMITTED;
use sadaqah_events::PlatformEvent;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ContactListParams {
    pub is_read: Option<bool>,
}

/// POST /api/v1/contact/create
pub async fn create_contact(
    State(state): State<AppState>,
    Json(mut input): Json<CreateContact>,
) -> AppResult<impl IntoResponse> {
    input.email = normalize_email(&input.email);
    validate_name(&input.name)?;
    validate_email(&input.email)?;
    validate_optional_text("subject", input.subject.as_deref(), MAX_TITLE_LENGTH)?;
    validate_message(&input.message)?;

    let contact = ContactRepo::create(&state.pool, &input).await?;
    tracing::info!(contact_id = contact.id, "Contact message received");

    state.event_bus.publish(
        PlatformEvent::new(CONTACT_SUBMITTED)
            .with_entity("contacts", contact.id)
            .with_payload(serde_json::json!({
                "name": contact.name,
                "email": contact.email,
                "subject": contact.subject,
                "message": contact.message,
            })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: contact })))
}

/// GET /api/v1/admin/contacts
pub async fn list_contacts(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(filter): Query<ContactListParams>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let contacts =
        ContactRepo::list(&state.pool, filter.is_read, page.limit(), page.offset()).await?;
    Ok(Json(DataResponse { data: contacts }))
}

/// GET /api/v1/admin/contacts/{id}
pub async fn get_contact(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let contact = ContactRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Contact",
            id,
        }))?;
    Ok(Json(DataResponse { data: contact }))
}

/// PUT /api/v1/admin/contacts/{id}
///
/// Mark a message read or unread.
pub async fn update_contact(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContactRead>,
) -> AppResult<impl IntoResponse> {
    let contact = ContactRepo::set_read(&state.pool, id, input.is_read)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Contact",
            id,
        }))?;
    Ok(Json(DataResponse { data: contact }))
}

/// DELETE /api/v1/admin/contacts/{id}
pub async fn delete_contact(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ContactRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Contact",
            id,
        }));
    }
    tracing::info!(contact_id = id, user_id = admin.user_id, "Contact message deleted");
    Ok(StatusCode::NO_CONTENT)
}
