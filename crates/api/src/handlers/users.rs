//! Admin user management.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sadaqah_core::error::CoreError;
use sadaqah_core::forms::validate_name;
use sadaqah_core::roles::validate_role;
use sadaqah_core::types::DbId;
use sadaqah_db::models::user::{UpdateUser, UserFilter, UserResponse};
use sadaqah_db::repositories::{SessionRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct UserListParams {
    pub role: Option<String>,
}

/// GET /api/v1/admin/users
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<UserListParams>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(role) = &params.role {
        validate_role(role)?;
    }
    let filter = UserFilter { role: params.role };
    let users = UserRepo::list(&state.pool, &filter, page.limit(), page.offset()).await?;
    let data: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

/// PUT /api/v1/admin/users/{id}
///
/// Admins may not demote or deactivate themselves.
pub async fn update_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    if let Some(role) = &input.role {
        validate_role(role)?;
    }
    if id == admin.user_id
        && (input.is_active == Some(false) || input.role.as_deref().is_some_and(|r| r != admin.role))
    {
        return Err(AppError::BadRequest(
            "You cannot change your own role or deactivate yourself".into(),
        ));
    }

    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    if !user.is_active {
        SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    }

    tracing::info!(
        target_user_id = id,
        role = %user.role,
        is_active = user.is_active,
        user_id = admin.user_id,
        "User updated"
    );
    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Soft delete: the account is deactivated and its sessions revoked.
pub async fn deactivate_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::BadRequest(
            "You cannot deactivate your own account".into(),
        ));
    }
    if !UserRepo::deactivate(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    tracing::info!(
        target_user_id = id,
        revoked_sessions = revoked,
        user_id = admin.user_id,
        "User deactivated"
    );
    Ok(StatusCode::NO_CONTENT)
}
