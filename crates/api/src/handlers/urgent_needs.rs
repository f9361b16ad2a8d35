//! Urgent fundraising appeals. Completed donations credit `raised_amount`
//! through the payment webhook; admins manage everything else here.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rust_decimal::Decimal;
use sadaqah_core::content::{
    resolve_slug, validate_body, validate_slug, validate_title, validate_url,
};
use sadaqah_core::error::CoreError;
use sadaqah_core::types::{DbId, Money};
use sadaqah_db::models::urgent_need::{CreateUrgentNeed, UpdateUrgentNeed};
use sadaqah_db::repositories::UrgentNeedRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct UrgentNeedListParams {
    pub active: Option<bool>,
}

fn validate_goal(goal: Option<Money>) -> Result<(), CoreError> {
    match goal {
        Some(amount) if amount <= Decimal::ZERO => Err(CoreError::Validation(
            "goal_amount must be greater than zero".to_string(),
        )),
        _ => Ok(()),
    }
}

/// GET /api/v1/urgent-needs
pub async fn list_active(
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let needs =
        UrgentNeedRepo::list(&state.pool, Some(true), page.limit(), page.offset()).await?;
    Ok(Json(DataResponse { data: needs }))
}

/// GET /api/v1/urgent-needs/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let need = UrgentNeedRepo::find_active_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Urgent need '{slug}' not found")))?;
    Ok(Json(DataResponse { data: need }))
}

/// GET /api/v1/admin/urgent-needs
pub async fn list_urgent_needs(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(filter): Query<UrgentNeedListParams>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let needs =
        UrgentNeedRepo::list(&state.pool, filter.active, page.limit(), page.offset()).await?;
    Ok(Json(DataResponse { data: needs }))
}

/// POST /api/v1/admin/urgent-needs
pub async fn create_urgent_need(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateUrgentNeed>,
) -> AppResult<impl IntoResponse> {
    validate_title("title", &input.title)?;
    validate_body("description", &input.description)?;
    validate_goal(input.goal_amount)?;
    if let Some(url) = &input.image_url {
        validate_url("image_url", url)?;
    }
    let slug = resolve_slug(input.slug.as_deref(), &input.title)?;

    let need = UrgentNeedRepo::create(&state.pool, &input, &slug).await?;
    tracing::info!(
        urgent_need_id = need.id,
        slug = %need.slug,
        user_id = admin.user_id,
        "Urgent need created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: need })))
}

/// GET /api/v1/admin/urgent-needs/{id}
pub async fn get_urgent_need(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let need = UrgentNeedRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "UrgentNeed",
            id,
        }))?;
    Ok(Json(DataResponse { data: need }))
}

/// PUT /api/v1/admin/urgent-needs/{id}
pub async fn update_urgent_need(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUrgentNeed>,
) -> AppResult<impl IntoResponse> {
    if let Some(title) = &input.title {
        validate_title("title", title)?;
    }
    if let Some(slug) = &input.slug {
        validate_slug(slug)?;
    }
    if let Some(description) = &input.description {
        validate_body("description", description)?;
    }
    validate_goal(input.goal_amount)?;
    if let Some(url) = &input.image_url {
        validate_url("image_url", url)?;
    }

    let need = UrgentNeedRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "UrgentNeed",
            id,
        }))?;

    tracing::info!(urgent_need_id = id, user_id = admin.user_id, "Urgent need updated");
    Ok(Json(DataResponse { data: need }))
}

/// DELETE /api/v1/admin/urgent-needs/{id}
///
/// Donations keep their amounts; their `urgent_need_id` is cleared by the
/// foreign key.
pub async fn delete_urgent_need(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !UrgentNeedRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "UrgentNeed",
            id,
        }));
    }
    tracing::info!(urgent_need_id = id, user_id = admin.user_id, "Urgent need deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn goal_must_be_positive_when_set() {
        assert!(validate_goal(None).is_ok());
        assert!(validate_goal(Some(dec!(5000))).is_ok());
        assert!(validate_goal(Some(dec!(0))).is_err());
        assert!(validate_goal(Some(dec!(-10))).is_err());
    }
}
