//! Payment provider seam.
//!
//! Handlers talk to [`PaymentGateway`]; production uses
//! [`stripe::StripeGateway`], tests substitute an in-memory fake.

pub mod stripe;

use async_trait::async_trait;

/// Errors from the payment provider client.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// No secret key is configured.
    #[error("payment provider is not configured")]
    NotConfigured,

    /// Network, DNS or TLS failure.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("unexpected provider response: {0}")]
    InvalidResponse(String),
}

impl PaymentError {
    /// Message safe to show to donors. Card declines and similar
    /// provider-side rejections are passed through; transport details are not.
    pub fn public_message(&self) -> String {
        match self {
            PaymentError::Provider { status, message } if *status < 500 => message.clone(),
            _ => "Payment provider is unavailable, please try again later".to_string(),
        }
    }
}

/// A one-time payment to be confirmed client-side.
#[derive(Debug, Clone)]
pub struct PaymentIntentRequest {
    /// Amount in minor units (cents).
    pub amount_minor: i64,
    pub currency: String,
    pub receipt_email: String,
    pub description: String,
    pub metadata: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

/// A recurring donation paid through a hosted checkout page.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub amount_minor: i64,
    pub currency: String,
    /// `month` or `year`.
    pub interval: String,
    pub customer_email: String,
    pub product_name: String,
    pub success_url: String,
    pub cancel_url: String,
    pub metadata: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError>;

    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError>;

    async fn cancel_subscription(&self, subscription_id: &str) -> Result<(), PaymentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_errors_are_shown_to_donors() {
        let err = PaymentError::Provider {
            status: 402,
            message: "Your card was declined.".into(),
        };
        assert_eq!(err.public_message(), "Your card was declined.");
    }

    #[test]
    fn outages_are_masked() {
        let err = PaymentError::Provider {
            status: 503,
            message: "upstream connect error".into(),
        };
        assert!(err.public_message().contains("unavailable"));
        assert!(PaymentError::NotConfigured
            .public_message()
            .contains("unavailable"));
    }
}
