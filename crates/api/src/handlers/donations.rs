//! Donations: Stripe payment intents and checkout sessions for donors,
//! history for signed-in donors, and the admin ledger.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sadaqah_core::content::MAX_TITLE_LENGTH;
use sadaqah_core::donation::{
    self, to_minor_units, validate_amount, validate_currency, validate_interval,
    FREQUENCY_MONTHLY, FREQUENCY_ONE_TIME, INTERVAL_MONTH,
};
use sadaqah_core::error::CoreError;
use sadaqah_core::forms::{
    normalize_email, validate_email, validate_name, validate_optional_text, MAX_MESSAGE_LENGTH,
};
use sadaqah_core::types::{DbId, Money};
use sadaqah_db::models::donation::{CreateDonation, DonationFilter, UpdateDonationStatus};
use sadaqah_db::repositories::{DonationRepo, UrgentNeedRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::payments::{CheckoutRequest, PaymentIntentRequest};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreatePaymentIntentRequest {
    pub amount: Money,
    /// Lowercase ISO code; the configured default when absent.
    pub currency: Option<String>,
    pub donor_name: String,
    pub donor_email: String,
    pub cause: Option<String>,
    pub urgent_need_id: Option<DbId>,
    #[serde(default)]
    pub is_anonymous: bool,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PaymentIntentResponse {
    pub client_secret: String,
    pub payment_intent_id: String,
    pub donation_id: DbId,
}

#[derive(Debug, Deserialize)]
pub struct CreateCheckoutSessionRequest {
    pub amount: Money,
    pub currency: Option<String>,
    /// `month` (default) or `year`.
    pub interval: Option<String>,
    pub donor_email: String,
    pub cause: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckoutSessionResponse {
    pub session_id: String,
    pub url: String,
}

fn resolve_currency(requested: Option<&str>, default: &str) -> Result<String, CoreError> {
    let currency = requested.unwrap_or(default).trim().to_ascii_lowercase();
    validate_currency(&currency)?;
    Ok(currency)
}

// ---------------------------------------------------------------------------
// Donor-facing handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/donations/create-payment-intent
///
/// Creates the provider payment intent and records a `pending` donation
/// keyed by its id. The webhook completes it.
pub async fn create_payment_intent(
    auth: MaybeAuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePaymentIntentRequest>,
) -> AppResult<impl IntoResponse> {
    let donor_email = normalize_email(&input.donor_email);
    validate_name(&input.donor_name)?;
    validate_email(&donor_email)?;
    validate_amount(input.amount)?;
    validate_optional_text("cause", input.cause.as_deref(), MAX_TITLE_LENGTH)?;
    validate_optional_text("message", input.message.as_deref(), MAX_MESSAGE_LENGTH)?;
    let currency = resolve_currency(
        input.currency.as_deref(),
        &state.config.stripe.default_currency,
    )?;

    if let Some(need_id) = input.urgent_need_id {
        let need = UrgentNeedRepo::find_by_id(&state.pool, need_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "UrgentNeed",
                id: need_id,
            }))?;
        if !need.is_active {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Urgent need '{}' is no longer accepting donations",
                need.slug
            ))));
        }
    }

    let user_id = auth.map(|user| user.user_id);
    let mut metadata = vec![("frequency".to_string(), FREQUENCY_ONE_TIME.to_string())];
    if let Some(id) = user_id {
        metadata.push(("user_id".to_string(), id.to_string()));
    }
    if let Some(need_id) = input.urgent_need_id {
        metadata.push(("urgent_need_id".to_string(), need_id.to_string()));
    }

    let intent = state
        .payments
        .create_payment_intent(&PaymentIntentRequest {
            amount_minor: to_minor_units(input.amount)?,
            currency: currency.clone(),
            receipt_email: donor_email.clone(),
            description: input
                .cause
                .clone()
                .unwrap_or_else(|| "Sadaqah donation".to_string()),
            metadata,
        })
        .await?;

    let donation = DonationRepo::create(
        &state.pool,
        &CreateDonation {
            user_id,
            donor_name: input.donor_name.trim().to_string(),
            donor_email,
            amount: input.amount,
            currency,
            frequency: FREQUENCY_ONE_TIME.to_string(),
            cause: input.cause,
            urgent_need_id: input.urgent_need_id,
            stripe_payment_intent_id: Some(intent.id.clone()),
            is_anonymous: input.is_anonymous,
            message: input.message,
        },
    )
    .await?;

    tracing::info!(
        donation_id = donation.id,
        payment_intent_id = %intent.id,
        amount = %donation.amount,
        currency = %donation.currency,
        "Payment intent created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: PaymentIntentResponse {
                client_secret: intent.client_secret,
                payment_intent_id: intent.id,
                donation_id: donation.id,
            },
        }),
    ))
}

/// POST /api/v1/donations/create-checkout-session
///
/// Recurring donations. Nothing is stored until the provider confirms the
/// subscription through the webhook.
pub async fn create_checkout_session(
    auth: MaybeAuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCheckoutSessionRequest>,
) -> AppResult<impl IntoResponse> {
    let donor_email = normalize_email(&input.donor_email);
    validate_email(&donor_email)?;
    validate_amount(input.amount)?;
    validate_optional_text("cause", input.cause.as_deref(), MAX_TITLE_LENGTH)?;
    let interval = input
        .interval
        .unwrap_or_else(|| INTERVAL_MONTH.to_string());
    validate_interval(&interval)?;
    let currency = resolve_currency(
        input.currency.as_deref(),
        &state.config.stripe.default_currency,
    )?;

    let mut metadata = vec![
        ("frequency".to_string(), FREQUENCY_MONTHLY.to_string()),
        ("billing_interval".to_string(), interval.clone()),
    ];
    if let Some(user) = &auth {
        metadata.push(("user_id".to_string(), user.user_id.to_string()));
    }

    let stripe = &state.config.stripe;
    let session = state
        .payments
        .create_checkout_session(&CheckoutRequest {
            amount_minor: to_minor_units(input.amount)?,
            currency,
            interval: interval.clone(),
            customer_email: donor_email,
            product_name: input
                .cause
                .unwrap_or_else(|| "Recurring Sadaqah".to_string()),
            success_url: stripe.success_url.clone(),
            cancel_url: stripe.cancel_url.clone(),
            metadata,
        })
        .await?;

    tracing::info!(
        session_id = %session.id,
        interval = %interval,
        "Checkout session created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CheckoutSessionResponse {
                session_id: session.id,
                url: session.url,
            },
        }),
    ))
}

/// GET /api/v1/donations/mine
pub async fn my_donations(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let donations =
        DonationRepo::list_for_user(&state.pool, user.user_id, page.limit(), page.offset())
            .await?;
    Ok(Json(DataResponse { data: donations }))
}

// ---------------------------------------------------------------------------
// Admin handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/donations
pub async fn list_donations(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(filter): Query<DonationFilter>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(status) = &filter.status {
        donation::validate_status(status)?;
    }
    if let Some(frequency) = &filter.frequency {
        donation::validate_frequency(frequency)?;
    }
    let donations = DonationRepo::list(&state.pool, &filter, page.limit(), page.offset()).await?;
    Ok(Json(DataResponse { data: donations }))
}

/// GET /api/v1/admin/donations/{id}
pub async fn get_donation(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let donation = DonationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Donation",
            id,
        }))?;
    Ok(Json(DataResponse { data: donation }))
}

/// PUT /api/v1/admin/donations/{id}/status
///
/// Manual correction only; it does not touch urgent-need totals.
pub async fn update_donation_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDonationStatus>,
) -> AppResult<impl IntoResponse> {
    donation::validate_status(&input.status)?;

    let donation = DonationRepo::update_status(&state.pool, id, &input.status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Donation",
            id,
        }))?;

    tracing::info!(
        donation_id = id,
        status = %donation.status,
        user_id = admin.user_id,
        "Donation status updated"
    );
    Ok(Json(DataResponse { data: donation }))
}

/// DELETE /api/v1/admin/donations/{id}
pub async fn delete_donation(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !DonationRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Donation",
            id,
        }));
    }
    tracing::info!(donation_id = id, user_id = admin.user_id, "Donation deleted");
    Ok(StatusCode::NO_CONTENT)
}
