//! HTTP tests for the donation flow: payment intents and checkout sessions
//! against a fake gateway, signed webhooks, and subscription management.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    body_json, get_auth, post_auth, post_json, post_json_auth, post_signed_webhook, send,
    FakeGateway,
};
use rust_decimal_macros::dec;
use sadaqah_db::models::urgent_need::CreateUrgentNeed;
use sadaqah_db::repositories::{DonationRepo, SubscriptionRepo, UrgentNeedRepo};
use sadaqah_events::bus::DONATION_COMPLETED;
use sadaqah_events::EventBus;
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn donation_body(amount: f64) -> serde_json::Value {
    json!({
        "amount": amount,
        "donor_name": "Khadija",
        "donor_email": "khadija@example.org",
        "cause": "Orphan sponsorship"
    })
}

fn succeeded_event(intent_id: &str) -> serde_json::Value {
    json!({
        "id": "evt_succeeded",
        "type": "payment_intent.succeeded",
        "data": { "object": { "id": intent_id, "object": "payment_intent" } }
    })
}

async fn create_need(pool: &PgPool, slug: &str, active: bool) -> i64 {
    let input = CreateUrgentNeed {
        title: "Winter Blankets".to_string(),
        slug: None,
        description: "Blankets for displaced families.".to_string(),
        goal_amount: Some(dec!(10000)),
        image_url: None,
        is_active: Some(active),
        sort_order: None,
    };
    UrgentNeedRepo::create(pool, &input, slug).await.unwrap().id
}

// ---------------------------------------------------------------------------
// Payment intents
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn payment_intent_records_pending_donation(pool: PgPool) {
    let gateway = Arc::new(FakeGateway::default());
    let app = common::build_test_app_with(
        pool.clone(),
        Arc::clone(&gateway),
        Arc::new(EventBus::default()),
    );

    let response = post_json(
        app,
        "/api/v1/donations/create-payment-intent",
        donation_body(25.5),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["payment_intent_id"], "pi_test_1");
    assert!(json["data"]["client_secret"].as_str().unwrap().contains("secret"));

    let calls = gateway.intents.lock().unwrap().clone();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].amount_minor, 2550);
    assert_eq!(calls[0].currency, "usd");

    let donation = DonationRepo::find_by_payment_intent(&pool, "pi_test_1")
        .await
        .unwrap()
        .expect("donation should be recorded");
    assert_eq!(donation.status, "pending");
    assert_eq!(donation.amount, dec!(25.5));
    assert_eq!(donation.frequency, "one_time");
    assert_eq!(donation.user_id, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn signed_in_donor_sees_own_donations(pool: PgPool) {
    let donor = common::create_user(&pool, "khadija@example.org", "donor").await;
    let token = common::token_for(&donor);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/donations/create-payment-intent",
        donation_body(10.0),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/api/v1/donations/mine", &token).await).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["user_id"], donor.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_amounts_never_reach_the_gateway(pool: PgPool) {
    let gateway = Arc::new(FakeGateway::default());
    for amount in [0.0, -5.0, 10.125, 2_000_000.0] {
        let app = common::build_test_app_with(
            pool.clone(),
            Arc::clone(&gateway),
            Arc::new(EventBus::default()),
        );
        let response = post_json(
            app,
            "/api/v1/donations/create-payment-intent",
            donation_body(amount),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "amount {amount}");
    }
    assert!(gateway.intents.lock().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unsupported_currency_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let mut body = donation_body(10.0);
    body["currency"] = json!("btc");
    let response = post_json(app, "/api/v1/donations/create-payment-intent", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn card_decline_surfaces_as_bad_gateway(pool: PgPool) {
    let app = common::build_test_app_with(
        pool.clone(),
        Arc::new(FakeGateway::declining()),
        Arc::new(EventBus::default()),
    );
    let response = post_json(
        app,
        "/api/v1/donations/create-payment-intent",
        donation_body(10.0),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "PAYMENT_PROVIDER_ERROR");
    assert_eq!(json["error"], "Your card was declined.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn inactive_urgent_need_refuses_donations(pool: PgPool) {
    let need_id = create_need(&pool, "closed-appeal", false).await;
    let app = common::build_test_app(pool);

    let mut body = donation_body(10.0);
    body["urgent_need_id"] = json!(need_id);
    let response = post_json(app, "/api/v1/donations/create-payment-intent", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Webhook
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn succeeded_webhook_completes_and_credits_once(pool: PgPool) {
    let need_id = create_need(&pool, "winter-blankets", true).await;
    let bus = Arc::new(EventBus::default());
    let mut rx = bus.subscribe();
    let gateway = Arc::new(FakeGateway::default());

    let mut body = donation_body(40.0);
    body["urgent_need_id"] = json!(need_id);
    let app = common::build_test_app_with(pool.clone(), Arc::clone(&gateway), Arc::clone(&bus));
    let response = post_json(app, "/api/v1/donations/create-payment-intent", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    for _ in 0..2 {
        let app =
            common::build_test_app_with(pool.clone(), Arc::clone(&gateway), Arc::clone(&bus));
        let response = post_signed_webhook(app, &succeeded_event("pi_test_1")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["received"], true);
    }

    let donation = DonationRepo::find_by_payment_intent(&pool, "pi_test_1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(donation.status, "completed");

    let need = UrgentNeedRepo::find_by_id(&pool, need_id).await.unwrap().unwrap();
    assert_eq!(need.raised_amount, dec!(40));

    let event = rx.try_recv().expect("completion should be announced");
    assert_eq!(event.event_type, DONATION_COMPLETED);
    assert!(rx.try_recv().is_err(), "redelivery must not announce again");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_webhook_marks_donation_failed(pool: PgPool) {
    let gateway = Arc::new(FakeGateway::default());
    let bus = Arc::new(EventBus::default());
    let app = common::build_test_app_with(pool.clone(), Arc::clone(&gateway), Arc::clone(&bus));
    post_json(app, "/api/v1/donations/create-payment-intent", donation_body(5.0)).await;

    let event = json!({
        "id": "evt_failed",
        "type": "payment_intent.payment_failed",
        "data": { "object": { "id": "pi_test_1" } }
    });
    let app = common::build_test_app_with(pool.clone(), gateway, bus);
    let response = post_signed_webhook(app, &event).await;
    assert_eq!(response.status(), StatusCode::OK);

    let donation = DonationRepo::find_by_payment_intent(&pool, "pi_test_1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(donation.status, "failed");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn webhook_with_bad_signature_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/donations/webhook")
        .header("stripe-signature", "t=1,v1=deadbeef")
        .body(Body::from(succeeded_event("pi_x").to_string()))
        .unwrap();
    let response = send(app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn webhook_with_extreme_timestamp_is_rejected(pool: PgPool) {
    for header in ["t=-9223372036854775808,v1=00", "t=9223372036854775807,v1=00"] {
        let app = common::build_test_app(pool.clone());
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/donations/webhook")
            .header("stripe-signature", header)
            .body(Body::from(succeeded_event("pi_x").to_string()))
            .unwrap();
        let response = send(app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{header}");
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn webhook_without_signature_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/donations/webhook")
        .body(Body::from(succeeded_event("pi_x").to_string()))
        .unwrap();
    let response = send(app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_webhook_events_are_acknowledged(pool: PgPool) {
    let app = common::build_test_app(pool);
    let event = json!({
        "id": "evt_other",
        "type": "charge.refunded",
        "data": { "object": { "id": "ch_1" } }
    });
    let response = post_signed_webhook(app, &event).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Recurring donations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn checkout_session_defaults_to_monthly(pool: PgPool) {
    let gateway = Arc::new(FakeGateway::default());
    let app = common::build_test_app_with(
        pool,
        Arc::clone(&gateway),
        Arc::new(EventBus::default()),
    );
    let body = json!({ "amount": 15, "donor_email": "monthly@example.org" });
    let response = post_json(app, "/api/v1/donations/create-checkout-session", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["data"]["url"].as_str().unwrap().starts_with("https://"));

    let calls = gateway.checkouts.lock().unwrap().clone();
    assert_eq!(calls[0].interval, "month");
    assert_eq!(calls[0].amount_minor, 1500);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn checkout_webhook_creates_subscription_admin_can_cancel(pool: PgPool) {
    let donor = common::create_user(&pool, "monthly@example.org", "donor").await;
    let donor_token = common::token_for(&donor);
    let admin = common::admin_token(&pool).await;
    let gateway = Arc::new(FakeGateway::default());
    let bus = Arc::new(EventBus::default());

    let event = json!({
        "id": "evt_checkout",
        "type": "checkout.session.completed",
        "data": { "object": {
            "id": "cs_test_1",
            "mode": "subscription",
            "subscription": "sub_123",
            "customer": "cus_9",
            "amount_total": 1500,
            "currency": "usd",
            "customer_email": "monthly@example.org",
            "metadata": { "user_id": donor.id.to_string(), "billing_interval": "month" }
        }}
    });
    let app = common::build_test_app_with(pool.clone(), Arc::clone(&gateway), Arc::clone(&bus));
    let response = post_signed_webhook(app, &event).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/v1/subscriptions/mine", &donor_token).await).await;
    let subs = json["data"].as_array().unwrap();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0]["status"], "active");
    assert_eq!(subs[0]["amount"], 15.0);
    let id = subs[0]["id"].as_i64().unwrap();

    let app = common::build_test_app_with(pool.clone(), Arc::clone(&gateway), bus);
    let uri = format!("/api/v1/admin/subscriptions/{id}/cancel");
    let response = post_auth(app, &uri, &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "cancelled");
    assert_eq!(gateway.cancelled.lock().unwrap().as_slice(), ["sub_123"]);

    let sub = SubscriptionRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert!(sub.cancelled_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn subscription_deleted_webhook_cancels(pool: PgPool) {
    let checkout = json!({
        "id": "evt_1",
        "type": "checkout.session.completed",
        "data": { "object": {
            "mode": "subscription",
            "subscription": "sub_777",
            "amount_total": 2000,
            "customer_email": "x@example.org"
        }}
    });
    let app = common::build_test_app(pool.clone());
    assert_eq!(post_signed_webhook(app, &checkout).await.status(), StatusCode::OK);

    let deleted = json!({
        "id": "evt_2",
        "type": "customer.subscription.deleted",
        "data": { "object": { "id": "sub_777" } }
    });
    let app = common::build_test_app(pool.clone());
    assert_eq!(post_signed_webhook(app, &deleted).await.status(), StatusCode::OK);

    let admin = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/subscriptions?status=cancelled", &admin).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}
