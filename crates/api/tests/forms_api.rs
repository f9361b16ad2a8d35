//! HTTP tests for the public forms: contact, volunteer and testimonial
//! submissions.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, get, post_json, put_json_auth, FakeGateway};
use sadaqah_events::bus::{CONTACT_SUBMITTED, TESTIMONIAL_SUBMITTED};
use sadaqah_events::EventBus;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn contact_form_is_stored_and_announced(pool: PgPool) {
    let bus = Arc::new(EventBus::default());
    let mut rx = bus.subscribe();
    let app = common::build_test_app_with(pool, Arc::new(FakeGateway::default()), bus);

    let body = json!({
        "name": "Yusuf",
        "email": " Yusuf@Example.ORG ",
        "subject": "Volunteering",
        "message": "How can I help at the food drive?"
    });
    let response = post_json(app, "/api/v1/contact/create", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "yusuf@example.org");
    assert_eq!(json["data"]["is_read"], false);

    let event = rx.try_recv().expect("contact event should be published");
    assert_eq!(event.event_type, CONTACT_SUBMITTED);
    assert_eq!(event.entity_id, json["data"]["id"].as_i64());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn contact_form_rejects_bad_email_and_empty_message(pool: PgPool) {
    let body = json!({ "name": "X", "email": "not-an-email", "message": "hi" });
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/contact/create", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json!({ "name": "X", "email": "x@example.org", "message": "   " });
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/contact/create", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn volunteer_application_starts_pending(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({
        "full_name": "Maryam Khan",
        "email": "maryam@example.org",
        "interests": "Food distribution",
        "availability": "Weekends"
    });
    let response = post_json(app, "/api/v1/volunteers", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "pending");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn testimonial_is_hidden_until_approved(pool: PgPool) {
    let bus = Arc::new(EventBus::default());
    let mut rx = bus.subscribe();
    let gateway = Arc::new(FakeGateway::default());
    let app = common::build_test_app_with(pool.clone(), gateway, bus);

    let body = json!({
        "author_name": "Ibrahim",
        "content": "The winter appeal reached my village.",
        "rating": 5
    });
    let response = post_json(app, "/api/v1/testimonials", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["data"]["status"], "pending");
    let id = created["data"]["id"].as_i64().unwrap();
    assert_eq!(rx.try_recv().unwrap().event_type, TESTIMONIAL_SUBMITTED);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/testimonials").await).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    let admin = common::admin_token(&pool).await;
    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/admin/testimonials/{id}/status"),
        json!({ "status": "approved" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/testimonials").await).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["author_name"], "Ibrahim");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn testimonial_rating_out_of_range_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({ "author_name": "A", "content": "Great work", "rating": 9 });
    let response = post_json(app, "/api/v1/testimonials", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
