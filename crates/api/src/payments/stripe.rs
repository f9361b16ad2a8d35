//! Stripe REST client over `reqwest`.
//!
//! Requests are form-encoded and authenticated with the secret key as a
//! bearer token; nested parameters use Stripe's bracket notation.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::{
    CheckoutRequest, CheckoutSession, PaymentError, PaymentGateway, PaymentIntent,
    PaymentIntentRequest,
};

const DEFAULT_API_BASE: &str = "https://api.stripe.com/v1";
const DEFAULT_SUCCESS_URL: &str = "http://localhost:5173/donate/success";
const DEFAULT_CANCEL_URL: &str = "http://localhost:5173/donate/cancel";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Stripe and checkout settings.
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Empty when payments are not configured.
    pub secret_key: String,
    pub webhook_secret: String,
    pub api_base: String,
    /// Currency used when a donation request does not name one.
    pub default_currency: String,
    pub success_url: String,
    pub cancel_url: String,
}

impl StripeConfig {
    /// | Env Var                 | Default                                |
    /// |-------------------------|----------------------------------------|
    /// | `STRIPE_SECRET_KEY`     | empty (gateway calls fail with 502)    |
    /// | `STRIPE_WEBHOOK_SECRET` | empty (every webhook is rejected)      |
    /// | `STRIPE_API_BASE`       | `https://api.stripe.com/v1`            |
    /// | `DONATION_CURRENCY`     | `usd`                                  |
    /// | `CHECKOUT_SUCCESS_URL`  | `http://localhost:5173/donate/success` |
    /// | `CHECKOUT_CANCEL_URL`   | `http://localhost:5173/donate/cancel`  |
    pub fn from_env() -> Self {
        Self {
            secret_key: std::env::var("STRIPE_SECRET_KEY").unwrap_or_default(),
            webhook_secret: std::env::var("STRIPE_WEBHOOK_SECRET").unwrap_or_default(),
            api_base: std::env::var("STRIPE_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            default_currency: std::env::var("DONATION_CURRENCY")
                .map(|c| c.to_lowercase())
                .unwrap_or_else(|_| "usd".to_string()),
            success_url: std::env::var("CHECKOUT_SUCCESS_URL")
                .unwrap_or_else(|_| DEFAULT_SUCCESS_URL.to_string()),
            cancel_url: std::env::var("CHECKOUT_CANCEL_URL")
                .unwrap_or_else(|_| DEFAULT_CANCEL_URL.to_string()),
        }
    }
}

pub struct StripeGateway {
    client: reqwest::Client,
    api_base: String,
    secret_key: String,
}

#[derive(Debug, Deserialize)]
struct IntentBody {
    id: String,
    client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SessionBody {
    id: String,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl StripeGateway {
    pub fn new(config: &StripeConfig) -> Result<Self, PaymentError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            secret_key: config.secret_key.clone(),
        })
    }

    async fn post_form<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        form: &[(String, String)],
    ) -> Result<T, PaymentError> {
        self.ensure_configured()?;
        let response = self
            .client
            .post(format!("{}{path}", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(form)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    fn ensure_configured(&self) -> Result<(), PaymentError> {
        if self.secret_key.is_empty() {
            return Err(PaymentError::NotConfigured);
        }
        Ok(())
    }

    async fn parse_response<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<T, PaymentError> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or(text);
            return Err(PaymentError::Provider {
                status: status.as_u16(),
                message,
            });
        }
        response.json::<T>().await.map_err(PaymentError::Request)
    }
}

/// Flatten metadata pairs under a bracketed prefix, e.g. `metadata[cause]`.
fn metadata_params(prefix: &str, metadata: &[(String, String)]) -> Vec<(String, String)> {
    metadata
        .iter()
        .map(|(k, v)| (format!("{prefix}[{k}]"), v.clone()))
        .collect()
}

fn intent_form(request: &PaymentIntentRequest) -> Vec<(String, String)> {
    let mut form = vec![
        ("amount".to_string(), request.amount_minor.to_string()),
        ("currency".to_string(), request.currency.clone()),
        ("receipt_email".to_string(), request.receipt_email.clone()),
        ("description".to_string(), request.description.clone()),
        (
            "automatic_payment_methods[enabled]".to_string(),
            "true".to_string(),
        ),
    ];
    form.extend(metadata_params("metadata", &request.metadata));
    form
}

fn checkout_form(request: &CheckoutRequest) -> Vec<(String, String)> {
    let item = "line_items[0]";
    let mut form = vec![
        ("mode".to_string(), "subscription".to_string()),
        ("customer_email".to_string(), request.customer_email.clone()),
        ("success_url".to_string(), request.success_url.clone()),
        ("cancel_url".to_string(), request.cancel_url.clone()),
        (format!("{item}[quantity]"), "1".to_string()),
        (format!("{item}[price_data][currency]"), request.currency.clone()),
        (
            format!("{item}[price_data][unit_amount]"),
            request.amount_minor.to_string(),
        ),
        (
            format!("{item}[price_data][recurring][interval]"),
            request.interval.clone(),
        ),
        (
            format!("{item}[price_data][product_data][name]"),
            request.product_name.clone(),
        ),
    ];
    form.extend(metadata_params("metadata", &request.metadata));
    form.extend(metadata_params("subscription_data[metadata]", &request.metadata));
    form
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        let body: IntentBody = self.post_form("/payment_intents", &intent_form(request)).await?;
        let client_secret = body.client_secret.ok_or_else(|| {
            PaymentError::InvalidResponse("payment intent has no client_secret".into())
        })?;
        tracing::info!(payment_intent_id = %body.id, "Payment intent created");
        Ok(PaymentIntent {
            id: body.id,
            client_secret,
        })
    }

    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let body: SessionBody = self
            .post_form("/checkout/sessions", &checkout_form(request))
            .await?;
        let url = body
            .url
            .ok_or_else(|| PaymentError::InvalidResponse("checkout session has no url".into()))?;
        tracing::info!(session_id = %body.id, "Checkout session created");
        Ok(CheckoutSession { id: body.id, url })
    }

    async fn cancel_subscription(&self, subscription_id: &str) -> Result<(), PaymentError> {
        self.ensure_configured()?;
        let response = self
            .client
            .delete(format!("{}/subscriptions/{subscription_id}", self.api_base))
            .bearer_auth(&self.secret_key)
            .send()
            .await?;
        let _: serde_json::Value = Self::parse_response(response).await?;
        tracing::info!(subscription_id, "Subscription cancelled at provider");
        Ok(())
    }
}
