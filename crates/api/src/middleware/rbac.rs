//! Role-based access control extractors.
//!
//! Both wrap [`AuthUser`], so a missing or invalid token is a 401 before any
//! role is looked at. Admin routes take [`RequireAdmin`]; donor-facing
//! routes such as `/donations/mine` take [`RequireAuth`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sadaqah_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn delete_story(
///     RequireAdmin(admin): RequireAdmin,
///     State(state): State<AppState>,
///     Path(id): Path<DbId>,
/// ) -> AppResult<StatusCode> {
///     // admin.user_id is an administrator here
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires any signed-in user, donor or admin.
///
/// Equivalent to taking [`AuthUser`] directly; the name documents at the
/// route that anonymous callers are refused.
///
/// ```ignore
/// async fn my_donations(RequireAuth(user): RequireAuth) -> AppResult<Json<()>> {
///     // user.user_id scopes the query to the caller's own rows
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
