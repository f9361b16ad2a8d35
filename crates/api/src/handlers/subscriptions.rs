//! Recurring donation subscriptions.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use sadaqah_core::donation::{validate_subscription_status, SUBSCRIPTION_CANCELLED};
use sadaqah_core::error::CoreError;
use sadaqah_core::types::DbId;
use sadaqah_db::models::subscription::SubscriptionFilter;
use sadaqah_db::repositories::SubscriptionRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/subscriptions/mine
pub async fn my_subscriptions(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let subscriptions = SubscriptionRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse {
        data: subscriptions,
    }))
}

/// GET /api/v1/admin/subscriptions
pub async fn list_subscriptions(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(filter): Query<SubscriptionFilter>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(status) = &filter.status {
        validate_subscription_status(status)?;
    }
    let subscriptions =
        SubscriptionRepo::list(&state.pool, &filter, page.limit(), page.offset()).await?;
    Ok(Json(DataResponse {
        data: subscriptions,
    }))
}

/// GET /api/v1/admin/subscriptions/{id}
pub async fn get_subscription(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let subscription = SubscriptionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subscription",
            id,
        }))?;
    Ok(Json(DataResponse { data: subscription }))
}

/// POST /api/v1/admin/subscriptions/{id}/cancel
///
/// Cancels at the provider first so a provider failure leaves the row
/// untouched. Cancelling twice is a no-op.
pub async fn cancel_subscription(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = SubscriptionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subscription",
            id,
        }))?;

    if existing.status == SUBSCRIPTION_CANCELLED {
        return Ok(Json(DataResponse { data: existing }));
    }

    if let Some(stripe_id) = &existing.stripe_subscription_id {
        state.payments.cancel_subscription(stripe_id).await?;
    }

    let subscription = SubscriptionRepo::cancel(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subscription",
            id,
        }))?;

    tracing::info!(
        subscription_id = id,
        user_id = admin.user_id,
        "Subscription cancelled"
    );
    Ok(Json(DataResponse { data: subscription }))
}
