#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use sadaqah_api::auth::jwt::{generate_access_token, JwtConfig};
use sadaqah_api::auth::password::hash_password;
use sadaqah_api::config::ServerConfig;
use sadaqah_api::payments::stripe::StripeConfig;
use sadaqah_api::payments::{
    CheckoutRequest, CheckoutSession, PaymentError, PaymentGateway, PaymentIntent,
    PaymentIntentRequest,
};
use sadaqah_api::router::build_app_router;
use sadaqah_api::state::AppState;
use sadaqah_core::payments::compute_signature;
use sadaqah_db::models::user::{CreateUser, User};
use sadaqah_db::repositories::UserRepo;
use sadaqah_events::EventBus;

pub const WEBHOOK_SECRET: &str = "whsec_integration_test";
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults and fixed secrets.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        stripe: StripeConfig {
            secret_key: "sk_test_fake".to_string(),
            webhook_secret: WEBHOOK_SECRET.to_string(),
            api_base: "http://127.0.0.1:9".to_string(),
            default_currency: "usd".to_string(),
            success_url: "http://localhost:5173/donate/success".to_string(),
            cancel_url: "http://localhost:5173/donate/cancel".to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Fake payment gateway
// ---------------------------------------------------------------------------

/// In-memory [`PaymentGateway`] that records every call.
#[derive(Default)]
pub struct FakeGateway {
    counter: AtomicUsize,
    /// When set, every call fails with a card decline.
    pub decline: bool,
    pub intents: Mutex<Vec<PaymentIntentRequest>>,
    pub checkouts: Mutex<Vec<CheckoutRequest>>,
    pub cancelled: Mutex<Vec<String>>,
}

impl FakeGateway {
    pub fn declining() -> Self {
        Self {
            decline: true,
            ..Self::default()
        }
    }

    fn next_id(&self) -> usize {
        self.counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn declined() -> PaymentError {
        PaymentError::Provider {
            status: 402,
            message: "Your card was declined.".to_string(),
        }
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        if self.decline {
            return Err(Self::declined());
        }
        self.intents.lock().unwrap().push(request.clone());
        let n = self.next_id();
        Ok(PaymentIntent {
            id: format!("pi_test_{n}"),
            client_secret: format!("pi_test_{n}_secret_abc"),
        })
    }

    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        if self.decline {
            return Err(Self::declined());
        }
        self.checkouts.lock().unwrap().push(request.clone());
        let n = self.next_id();
        Ok(CheckoutSession {
            id: format!("cs_test_{n}"),
            url: format!("https://checkout.stripe.test/c/cs_test_{n}"),
        })
    }

    async fn cancel_subscription(&self, subscription_id: &str) -> Result<(), PaymentError> {
        if self.decline {
            return Err(Self::declined());
        }
        self.cancelled
            .lock()
            .unwrap()
            .push(subscription_id.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build the full application router (same middleware stack as `main.rs`)
/// with a fresh fake gateway.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(
        pool,
        Arc::new(FakeGateway::default()),
        Arc::new(EventBus::default()),
    )
}

/// Build the router around a caller-owned gateway and event bus so tests
/// can inspect provider calls and published events.
pub fn build_test_app_with(
    pool: PgPool,
    gateway: Arc<FakeGateway>,
    event_bus: Arc<EventBus>,
) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus,
        payments: gateway,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Users and tokens
// ---------------------------------------------------------------------------

/// Insert a user with [`TEST_PASSWORD`].
pub async fn create_user(pool: &PgPool, email: &str, role: &str) -> User {
    let password_hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    UserRepo::create(
        pool,
        &CreateUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash,
            role: role.to_string(),
        },
    )
    .await
    .expect("user creation should succeed")
}

/// Mint an access token for a user, signed with the test secret.
pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, &user.role, &test_config().jwt)
        .expect("token generation should succeed")
}

pub async fn admin_token(pool: &PgPool) -> String {
    token_for(&create_user(pool, "admin@sadaqah.test", "admin").await)
}

pub async fn donor_token(pool: &PgPool) -> String {
    token_for(&create_user(pool, "donor@sadaqah.test", "donor").await)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

fn json_request(
    method: &str,
    uri: &str,
    body: &serde_json::Value,
    token: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request("GET", uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request("GET", uri, Some(token))).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request("POST", uri, &body, None)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request("POST", uri, &body, Some(token))).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request("PUT", uri, &body, Some(token))).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request("POST", uri, Some(token))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request("DELETE", uri, Some(token))).await
}

/// POST a webhook payload signed with [`WEBHOOK_SECRET`] at the current time.
pub async fn post_signed_webhook(app: Router, payload: &serde_json::Value) -> Response<Body> {
    let body = serde_json::to_vec(payload).unwrap();
    let timestamp = chrono::Utc::now().timestamp();
    let signature = compute_signature(WEBHOOK_SECRET, timestamp, &body);
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/donations/webhook")
        .header("content-type", "application/json")
        .header("stripe-signature", format!("t={timestamp},v1={signature}"))
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

pub fn assert_status(response: &Response<Body>, expected: StatusCode) {
    assert_eq!(response.status(), expected, "unexpected status code");
}
