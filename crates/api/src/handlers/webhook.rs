//! Stripe webhook receiver.
//!
//! The raw body is verified against the `Stripe-Signature` header before it
//! is parsed. Every handled transition is idempotent, so provider retries
//! are safe to acknowledge.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use chrono::{DateTime, Utc};
use sadaqah_core::donation::{from_minor_units, validate_interval, INTERVAL_MONTH};
use sadaqah_core::error::CoreError;
use sadaqah_core::forms::normalize_email;
use sadaqah_core::payments::{
    verify_signature, DEFAULT_TOLERANCE_SECS, EVENT_CHECKOUT_COMPLETED, EVENT_PAYMENT_FAILED,
    EVENT_PAYMENT_SUCCEEDED, EVENT_SUBSCRIPTION_DELETED, SIGNATURE_HEADER,
};
use sadaqah_db::models::subscription::UpsertSubscription;
use sadaqah_db::repositories::{DonationRepo, SubscriptionRepo};
use sadaqah_events::bus::DONATION_COMPLETED;
use sadaqah_events::PlatformEvent;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StripeEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: StripeEventData,
}

#[derive(Debug, Deserialize)]
pub struct StripeEventData {
    pub object: Value,
}

/// POST /api/v1/donations/webhook
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<Value>> {
    let secret = &state.config.stripe.webhook_secret;
    if secret.is_empty() {
        tracing::warn!("Webhook received but STRIPE_WEBHOOK_SECRET is not set");
        return Err(AppError::BadRequest("Webhook endpoint is not configured".into()));
    }

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::BadRequest("Missing Stripe-Signature header".into()))?;

    verify_signature(
        &body,
        signature,
        secret,
        Utc::now().timestamp(),
        DEFAULT_TOLERANCE_SECS,
    )
    .map_err(|err| {
        tracing::warn!(error = %err, "Rejected webhook with bad signature");
        AppError::Core(CoreError::from(err))
    })?;

    let event: StripeEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Malformed webhook payload: {e}")))?;

    tracing::debug!(event_id = %event.id, event_type = %event.event_type, "Webhook received");

    match event.event_type.as_str() {
        EVENT_PAYMENT_SUCCEEDED => payment_succeeded(&state, &event.data.object).await?,
        EVENT_PAYMENT_FAILED => payment_failed(&state, &event.data.object).await?,
        EVENT_CHECKOUT_COMPLETED => checkout_completed(&state, &event.data.object).await?,
        EVENT_SUBSCRIPTION_DELETED => subscription_deleted(&state, &event.data.object).await?,
        other => tracing::debug!(event_type = other, "Ignoring unhandled webhook event"),
    }

    Ok(Json(json!({ "received": true })))
}

fn object_id(object: &Value) -> AppResult<&str> {
    object
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::BadRequest("Webhook object has no id".into()))
}

async fn payment_succeeded(state: &AppState, object: &Value) -> AppResult<()> {
    let intent_id = object_id(object)?;

    match DonationRepo::complete_payment(&state.pool, intent_id).await? {
        Some(donation) => {
            tracing::info!(
                donation_id = donation.id,
                payment_intent_id = intent_id,
                amount = %donation.amount,
                "Donation completed"
            );
            let donor = if donation.is_anonymous {
                "Anonymous".to_string()
            } else {
                donation.donor_name.clone()
            };
            state.event_bus.publish(
                PlatformEvent::new(DONATION_COMPLETED)
                    .with_entity("donations", donation.id)
                    .with_payload(json!({
                        "donor": donor,
                        "amount": donation.amount,
                        "currency": donation.currency,
                        "cause": donation.cause,
                    })),
            );
        }
        None => {
            tracing::debug!(
                payment_intent_id = intent_id,
                "No pending donation for payment intent"
            );
        }
    }
    Ok(())
}

async fn payment_failed(state: &AppState, object: &Value) -> AppResult<()> {
    let intent_id = object_id(object)?;
    if let Some(donation) = DonationRepo::fail_payment(&state.pool, intent_id).await? {
        tracing::info!(
            donation_id = donation.id,
            payment_intent_id = intent_id,
            "Donation payment failed"
        );
    }
    Ok(())
}

async fn checkout_completed(state: &AppState, object: &Value) -> AppResult<()> {
    let Some(input) = subscription_from_checkout(object) else {
        tracing::debug!("Checkout session is not a subscription, ignoring");
        return Ok(());
    };

    let subscription = SubscriptionRepo::upsert(&state.pool, &input).await?;
    tracing::info!(
        subscription_id = subscription.id,
        stripe_subscription_id = %input.stripe_subscription_id,
        amount = %subscription.amount,
        interval = %subscription.billing_interval,
        "Subscription activated"
    );
    Ok(())
}

async fn subscription_deleted(state: &AppState, object: &Value) -> AppResult<()> {
    let stripe_id = object_id(object)?;
    if let Some(subscription) = SubscriptionRepo::cancel_by_stripe_id(&state.pool, stripe_id).await?
    {
        tracing::info!(
            subscription_id = subscription.id,
            stripe_subscription_id = stripe_id,
            "Subscription cancelled by provider"
        );
    }
    Ok(())
}

/// Map a completed checkout session to a subscription row.
///
/// `None` for non-subscription sessions or when the session lacks the
/// subscription id, amount or customer email.
fn subscription_from_checkout(object: &Value) -> Option<UpsertSubscription> {
    if object.get("mode").and_then(Value::as_str) != Some("subscription") {
        return None;
    }

    let stripe_subscription_id = object.get("subscription")?.as_str()?.to_string();
    let amount = from_minor_units(object.get("amount_total")?.as_i64()?);
    let email = object
        .get("customer_email")
        .and_then(Value::as_str)
        .or_else(|| {
            object
                .get("customer_details")
                .and_then(|d| d.get("email"))
                .and_then(Value::as_str)
        })?;

    let metadata = object.get("metadata");
    let meta = |key: &str| metadata.and_then(|m| m.get(key)).and_then(Value::as_str);

    let billing_interval = meta("billing_interval")
        .filter(|i| validate_interval(i).is_ok())
        .unwrap_or(INTERVAL_MONTH)
        .to_string();

    Some(UpsertSubscription {
        user_id: meta("user_id").and_then(|id| id.parse().ok()),
        donor_email: normalize_email(email),
        amount,
        currency: object
            .get("currency")
            .and_then(Value::as_str)
            .unwrap_or("usd")
            .to_ascii_lowercase(),
        billing_interval,
        stripe_subscription_id,
        stripe_customer_id: object
            .get("customer")
            .and_then(Value::as_str)
            .map(str::to_string),
        current_period_end: object
            .get("current_period_end")
            .and_then(Value::as_i64)
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn checkout_session_maps_to_subscription() {
        let object = json!({
            "id": "cs_1",
            "mode": "subscription",
            "subscription": "sub_1",
            "customer": "cus_1",
            "amount_total": 2500,
            "currency": "USD",
            "customer_details": { "email": "Donor@Example.org" },
            "metadata": { "user_id": "7", "billing_interval": "year" }
        });
        let sub = subscription_from_checkout(&object).unwrap();
        assert_eq!(sub.stripe_subscription_id, "sub_1");
        assert_eq!(sub.stripe_customer_id.as_deref(), Some("cus_1"));
        assert_eq!(sub.amount, dec!(25));
        assert_eq!(sub.currency, "usd");
        assert_eq!(sub.donor_email, "donor@example.org");
        assert_eq!(sub.user_id, Some(7));
        assert_eq!(sub.billing_interval, "year");
    }

    #[test]
    fn unknown_interval_falls_back_to_month() {
        let object = json!({
            "mode": "subscription",
            "subscription": "sub_2",
            "amount_total": 1000,
            "customer_email": "a@b.org",
            "metadata": { "billing_interval": "fortnight" }
        });
        let sub = subscription_from_checkout(&object).unwrap();
        assert_eq!(sub.billing_interval, "month");
        assert_eq!(sub.user_id, None);
    }

    #[test]
    fn payment_mode_sessions_are_ignored() {
        let object = json!({ "mode": "payment", "amount_total": 500 });
        assert!(subscription_from_checkout(&object).is_none());
    }

    #[test]
    fn event_envelope_parses() {
        let event: StripeEvent = serde_json::from_str(
            r#"{"id":"evt_1","type":"payment_intent.succeeded","data":{"object":{"id":"pi_1"}}}"#,
        )
        .unwrap();
        assert_eq!(event.event_type, EVENT_PAYMENT_SUCCEEDED);
        assert_eq!(object_id(&event.data.object).unwrap(), "pi_1");
    }
}
