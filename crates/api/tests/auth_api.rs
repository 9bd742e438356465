//! HTTP-level tests for passwordless sign-in, token refresh, sign-out and
//! the session/role lookup.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_auth, post_json, RecordingMailer};
use serde_json::json;
use sqlx::PgPool;
use storefront_db::models::profile::Role;
use storefront_db::repositories::{AuthUserRepo, ProfileRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Request a code for `email` and return the plaintext the mailer received.
async fn request_code(app: axum::Router, mailer: &RecordingMailer, email: &str) -> String {
    let response = post_json(app, "/api/v1/auth/otp", json!({ "email": email })).await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    mailer
        .last_code_for(&email.to_lowercase())
        .expect("mailer should have received a code")
}

async fn sign_in(app: axum::Router, mailer: &RecordingMailer, email: &str) -> serde_json::Value {
    let code = request_code(app.clone(), mailer, email).await;
    let response = post_json(
        app,
        "/api/v1/auth/verify",
        json!({ "email": email, "code": code }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Sign-in
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn otp_request_reports_lifetime(pool: PgPool) {
    let mailer = Arc::new(RecordingMailer::default());
    let app = common::build_test_app_with_mailer(pool, mailer.clone());

    let response = post_json(app, "/api/v1/auth/otp", json!({ "email": " Owner@Shop.PK " })).await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let json = body_json(response).await;
    assert_eq!(json["email"], "owner@shop.pk");
    assert_eq!(json["expires_in"], 600);
    assert_eq!(mailer.last_code_for("owner@shop.pk").unwrap().len(), 6);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn otp_request_rejects_malformed_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/v1/auth/otp", json!({ "email": "not-an-email" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn verify_returns_tokens_and_user(pool: PgPool) {
    let mailer = Arc::new(RecordingMailer::default());
    let app = common::build_test_app_with_mailer(pool.clone(), mailer.clone());

    let json = sign_in(app, &mailer, "buyer@shop.pk").await;

    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["expires_in"], 900);
    assert_eq!(json["user"]["email"], "buyer@shop.pk");

    let user = AuthUserRepo::find_by_email(&pool, "buyer@shop.pk")
        .await
        .unwrap()
        .unwrap();
    assert!(user.last_sign_in_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_code_is_rejected(pool: PgPool) {
    let mailer = Arc::new(RecordingMailer::default());
    let app = common::build_test_app_with_mailer(pool, mailer.clone());

    let code = request_code(app.clone(), &mailer, "buyer@shop.pk").await;
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let response = post_json(
        app,
        "/api/v1/auth/verify",
        json!({ "email": "buyer@shop.pk", "code": wrong }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Invalid or expired code");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn code_cannot_be_used_twice(pool: PgPool) {
    let mailer = Arc::new(RecordingMailer::default());
    let app = common::build_test_app_with_mailer(pool, mailer.clone());

    let code = request_code(app.clone(), &mailer, "buyer@shop.pk").await;
    let body = json!({ "email": "buyer@shop.pk", "code": code });

    let first = post_json(app.clone(), "/api/v1/auth/verify", body.clone()).await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = post_json(app, "/api/v1/auth/verify", body).await;
    assert_eq!(second.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn code_is_burned_after_too_many_attempts(pool: PgPool) {
    let mailer = Arc::new(RecordingMailer::default());
    let app = common::build_test_app_with_mailer(pool, mailer.clone());

    let code = request_code(app.clone(), &mailer, "buyer@shop.pk").await;
    let wrong = if code == "000000" { "111111" } else { "000000" };

    for _ in 0..5 {
        let response = post_json(
            app.clone(),
            "/api/v1/auth/verify",
            json!({ "email": "buyer@shop.pk", "code": wrong }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // The right code no longer works once the attempt budget is spent.
    let response = post_json(
        app,
        "/api/v1/auth/verify",
        json!({ "email": "buyer@shop.pk", "code": code }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Refresh and sign-out
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_rotates_the_token(pool: PgPool) {
    let mailer = Arc::new(RecordingMailer::default());
    let app = common::build_test_app_with_mailer(pool, mailer.clone());
    let tokens = sign_in(app.clone(), &mailer, "buyer@shop.pk").await;
    let old_refresh = tokens["refresh_token"].as_str().unwrap().to_string();

    let response = post_json(
        app.clone(),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": old_refresh }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    assert_ne!(rotated["refresh_token"], tokens["refresh_token"]);

    let reuse = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": old_refresh }),
    )
    .await;
    assert_eq!(reuse.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_revokes_refresh_tokens(pool: PgPool) {
    let mailer = Arc::new(RecordingMailer::default());
    let app = common::build_test_app_with_mailer(pool, mailer.clone());
    let tokens = sign_in(app.clone(), &mailer, "buyer@shop.pk").await;
    let access = tokens["access_token"].as_str().unwrap();

    let response = post_auth(app.clone(), "/api/v1/auth/logout", access).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let refresh = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": tokens["refresh_token"] }),
    )
    .await;
    assert_eq!(refresh.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Session and role
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn session_provisions_default_role(pool: PgPool) {
    let mailer = Arc::new(RecordingMailer::default());
    let app = common::build_test_app_with_mailer(pool.clone(), mailer.clone());
    let tokens = sign_in(app.clone(), &mailer, "new@shop.pk").await;

    let response = get_auth(
        app,
        "/api/v1/auth/session",
        tokens["access_token"].as_str().unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user"]["email"], "new@shop.pk");
    assert_eq!(json["role"], "user");

    let user_id: uuid::Uuid = tokens["user"]["id"].as_str().unwrap().parse().unwrap();
    let profile = ProfileRepo::find_or_provision(&pool, user_id).await.unwrap();
    assert_eq!(profile.role, Some(Role::User));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn session_reports_admin_role(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let json = body_json(get_auth(app, "/api/v1/auth/session", &token).await).await;

    assert_eq!(json["role"], "admin");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn session_reports_null_role(pool: PgPool) {
    let token = common::token_for(&pool, "norole@shop.pk", None).await;
    let app = common::build_test_app(pool);

    let json = body_json(get_auth(app, "/api/v1/auth/session", &token).await).await;

    assert!(json["role"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn session_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/auth/session").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn garbage_token_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/auth/session", "not.a.jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Invalid or expired token");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_bearer_scheme_is_rejected(pool: PgPool) {
    use tower::ServiceExt;

    let app = common::build_test_app(pool);
    let request = axum::http::Request::builder()
        .uri("/api/v1/auth/session")
        .header("authorization", "Basic YWRtaW46c2VjcmV0")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["error"],
        "Authorization header must be `Bearer <token>`"
    );
}
