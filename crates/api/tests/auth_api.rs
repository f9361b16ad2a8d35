//! HTTP-level integration tests for registration, login, refresh and logout.

mod common;

use axum::body::Body;
use axum::http::{Response, StatusCode};
use axum::Router;
use common::{body_json, get_auth, post_auth, post_json, TEST_PASSWORD};
use sadaqah_db::repositories::UserRepo;
use serde_json::json;
use sqlx::PgPool;

async fn login(app: Router, email: &str, password: &str) -> Response<Body> {
    post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": email, "password": password }),
    )
    .await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_creates_donor_and_returns_tokens(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({
        "name": "Amina",
        "email": "Amina@Example.org",
        "password": "long-enough-pw"
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["expires_in"], 15 * 60);
    assert_eq!(json["user"]["email"], "amina@example.org");
    assert_eq!(json["user"]["role"], "donor");
    assert!(json["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_duplicate_email(pool: PgPool) {
    common::create_user(&pool, "taken@example.org", "donor").await;
    let app = common::build_test_app(pool);

    let body = json!({
        "name": "Someone",
        "email": "TAKEN@example.org",
        "password": "long-enough-pw"
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_short_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({ "name": "Bilal", "email": "b@example.org", "password": "short" });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_success_and_wrong_password(pool: PgPool) {
    let user = common::create_user(&pool, "donor@example.org", "donor").await;

    let app = common::build_test_app(pool.clone());
    let response = login(app, "donor@example.org", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user"]["id"], user.id);

    let app = common::build_test_app(pool);
    let response = login(app, "donor@example.org", "wrong-password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_to_deactivated_account_is_forbidden(pool: PgPool) {
    let user = common::create_user(&pool, "gone@example.org", "donor").await;
    UserRepo::deactivate(&pool, user.id).await.unwrap();

    let app = common::build_test_app(pool);
    let response = login(app, "gone@example.org", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_rotates_the_token(pool: PgPool) {
    common::create_user(&pool, "rot@example.org", "donor").await;
    let app = common::build_test_app(pool.clone());
    let json = body_json(login(app, "rot@example.org", TEST_PASSWORD).await).await;
    let original = json["refresh_token"].as_str().unwrap().to_string();

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": original }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    assert_ne!(rotated["refresh_token"].as_str().unwrap(), original);

    // The used token is revoked.
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": original }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_refreshes_of_one_token_rotate_once(pool: PgPool) {
    common::create_user(&pool, "race@example.org", "donor").await;
    let app = common::build_test_app(pool.clone());
    let json = body_json(login(app, "race@example.org", TEST_PASSWORD).await).await;
    let token = json["refresh_token"].as_str().unwrap().to_string();

    let refresh = |pool: PgPool, token: String| async move {
        post_json(
            common::build_test_app(pool),
            "/api/v1/auth/refresh",
            json!({ "refresh_token": token }),
        )
        .await
        .status()
    };
    let (a, b) = tokio::join!(
        refresh(pool.clone(), token.clone()),
        refresh(pool.clone(), token)
    );

    let mut statuses = [a, b];
    statuses.sort_by_key(|s| s.as_u16());
    assert_eq!(statuses, [StatusCode::OK, StatusCode::UNAUTHORIZED]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_revokes_refresh_tokens(pool: PgPool) {
    common::create_user(&pool, "out@example.org", "donor").await;
    let app = common::build_test_app(pool.clone());
    let json = body_json(login(app, "out@example.org", TEST_PASSWORD).await).await;
    let access = json["access_token"].as_str().unwrap().to_string();
    let refresh = json["refresh_token"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, "/api/v1/auth/logout", &access).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_requires_a_valid_token(pool: PgPool) {
    let user = common::create_user(&pool, "me@example.org", "donor").await;
    let token = common::token_for(&user);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "me@example.org");

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/auth/me", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
