//! HTTP tests for the admin console: role enforcement and the CRUD
//! resources behind `/api/v1/admin`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, get_auth, post_json, post_json_auth, put_json_auth,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Role enforcement
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_routes_require_a_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/admin/dashboard").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_routes_reject_donors(pool: PgPool) {
    let donor = common::donor_token(&pool).await;
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/donations", &donor).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn dashboard_summary_for_admin(pool: PgPool) {
    let admin = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/dashboard", &admin).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["completed_donations"], 0);
    assert_eq!(json["data"]["total_raised"], 0.0);
}

// ---------------------------------------------------------------------------
// Stories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn story_lifecycle(pool: PgPool) {
    let admin = common::admin_token(&pool).await;

    let body = json!({
        "title": "Clean Water for Thar",
        "body": "Twelve wells were dug this spring."
    });
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/stories",
        body,
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let story = body_json(response).await;
    assert_eq!(story["data"]["slug"], "clean-water-for-thar");
    assert_eq!(story["data"]["is_published"], false);
    let id = story["data"]["id"].as_i64().unwrap();

    // Drafts are not public.
    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/stories/clean-water-for-thar").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/admin/stories/{id}"),
        json!({ "is_published": true }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert!(updated["data"]["published_at"].is_string());

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/stories/clean-water-for-thar").await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/admin/stories/{id}");
    let response = delete_auth(app, &uri, &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get_auth(app, &uri, &admin).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_story_slug_conflicts(pool: PgPool) {
    let admin = common::admin_token(&pool).await;
    let body = json!({ "title": "Eid Gifts", "body": "Toys for 300 children." });

    let first = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/stories",
        body.clone(),
        &admin,
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second =
        post_json_auth(common::build_test_app(pool), "/api/v1/admin/stories", body, &admin).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Urgent needs, slideshow, media
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn urgent_need_is_public_by_slug(pool: PgPool) {
    let admin = common::admin_token(&pool).await;
    let body = json!({
        "title": "Flood Relief",
        "description": "Emergency shelter and food.",
        "goal_amount": 50000
    });
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/urgent-needs",
        body,
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let need = body_json(response).await;
    assert_eq!(need["data"]["raised_amount"], 0.0);
    assert_eq!(need["data"]["is_active"], true);

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/urgent-needs/flood-relief").await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let body = json!({ "title": "Bad", "description": "x", "goal_amount": 0 });
    let response = post_json_auth(app, "/api/v1/admin/urgent-needs", body, &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn slideshow_reorder_changes_public_order(pool: PgPool) {
    let admin = common::admin_token(&pool).await;
    let mut ids = Vec::new();
    for n in 1..=3 {
        let body = json!({ "title": format!("Slide {n}"), "image_url": format!("/img/{n}.jpg") });
        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/admin/slideshow",
            body,
            &admin,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        ids.push(body_json(response).await["data"]["id"].as_i64().unwrap());
    }

    let reversed: Vec<i64> = ids.iter().rev().copied().collect();
    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/slideshow/reorder",
        json!({ "slide_ids": reversed }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["updated"], 3);

    let json = body_json(get(common::build_test_app(pool), "/api/v1/slideshow").await).await;
    let order: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    assert_eq!(order, reversed);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn slide_with_unsafe_url_is_rejected(pool: PgPool) {
    let admin = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let body = json!({ "image_url": "javascript:alert(1)" });
    let response = post_json_auth(app, "/api/v1/admin/slideshow", body, &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn media_filter_by_type(pool: PgPool) {
    let admin = common::admin_token(&pool).await;
    for (title, kind, url) in [
        ("Well opening", "image", "https://cdn.example.org/well.jpg"),
        ("Appeal video", "video", "https://video.example.org/appeal"),
    ] {
        let body = json!({ "title": title, "media_type": kind, "url": url });
        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/admin/media",
            body,
            &admin,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/media?media_type=video").await).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Appeal video");

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/media?media_type=audio").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Moderation and inbox
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn volunteer_status_is_validated(pool: PgPool) {
    let admin = common::admin_token(&pool).await;
    let body = json!({ "full_name": "Hamza", "email": "hamza@example.org" });
    let app = common::build_test_app(pool.clone());
    let created = body_json(post_json(app, "/api/v1/volunteers", body).await).await;
    let uri = format!("/api/v1/admin/volunteers/{}/status", created["data"]["id"]);

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(app, &uri, json!({ "status": "hired" }), &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(app, &uri, json!({ "status": "approved" }), &admin).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/volunteers?status=approved", &admin).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn contacts_can_be_marked_read(pool: PgPool) {
    let admin = common::admin_token(&pool).await;
    let body = json!({ "name": "Sara", "email": "sara@example.org", "message": "Salaam" });
    let app = common::build_test_app(pool.clone());
    let created = body_json(post_json(app, "/api/v1/contact/create", body).await).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/admin/contacts/{id}");
    let response = put_json_auth(app, &uri, json!({ "is_read": true }), &admin).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/admin/contacts?is_read=false", &admin).await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/contacts?is_read=true", &admin).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_resources_are_404(pool: PgPool) {
    let admin = common::admin_token(&pool).await;
    for uri in [
        "/api/v1/admin/contacts/9999",
        "/api/v1/admin/donations/9999",
        "/api/v1/admin/events/9999",
        "/api/v1/admin/users/9999",
    ] {
        let response = get_auth(common::build_test_app(pool.clone()), uri, &admin).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_deactivates_donor_but_not_self(pool: PgPool) {
    let admin_user = common::create_user(&pool, "root@sadaqah.test", "admin").await;
    let admin = common::token_for(&admin_user);
    let donor = common::create_user(&pool, "d@sadaqah.test", "donor").await;

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/admin/users/{}", donor.id);
    let response = delete_auth(app, &uri, &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, &uri, &admin).await).await;
    assert_eq!(json["data"]["is_active"], false);

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/admin/users/{}", admin_user.id);
    let response = delete_auth(app, &uri, &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let response = put_json_auth(app, &uri, json!({ "role": "donor" }), &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn user_list_filters_by_role(pool: PgPool) {
    let admin = common::admin_token(&pool).await;
    common::create_user(&pool, "one@sadaqah.test", "donor").await;
    common::create_user(&pool, "two@sadaqah.test", "donor").await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/v1/admin/users?role=donor", &admin).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/users?role=superuser", &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
