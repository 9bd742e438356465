//! Shared helpers for HTTP-level integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use storefront_api::auth::mailer::{MailError, OtpMailer};
use storefront_api::auth::otp::OtpConfig;
use storefront_api::auth::tokens::TokenConfig;
use storefront_api::config::ServerConfig;
use storefront_api::router::build_app_router;
use storefront_api::state::AppState;
use storefront_cdn::{CdnConfig, CdnError, ImageUploader, UploadedImage};
use storefront_db::models::profile::Role;
use storefront_db::repositories::{AuthUserRepo, ProfileRepo};

// ---------------------------------------------------------------------------
// Config and fakes
// ---------------------------------------------------------------------------

/// Local-only settings with a fixed signing secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        tokens: TokenConfig {
            secret: "storefront-integration-secret".to_string(),
            access_ttl_mins: 15,
            refresh_ttl_days: 7,
        },
        otp: OtpConfig::default(),
    }
}

pub fn test_cdn_config() -> CdnConfig {
    CdnConfig::new("shop", "unsigned", "https://api.cdn.test", "https://cdn.test")
}

/// Captures sign-in codes instead of sending them.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingMailer {
    /// The last code sent to `email`.
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
    }
}

#[async_trait]
impl OtpMailer for RecordingMailer {
    async fn send_code(&self, to_email: &str, code: &str, _ttl_mins: i64) -> Result<(), MailError> {
        self.sent
            .lock()
            .unwrap()
            .push((to_email.to_string(), code.to_string()));
        Ok(())
    }
}

/// Returns `products/<file name>` as the public id. A file named
/// `reject.png` simulates a CDN response without a public id.
pub struct FakeUploader;

#[async_trait]
impl ImageUploader for FakeUploader {
    async fn upload(&self, file_name: &str, _bytes: Vec<u8>) -> Result<UploadedImage, CdnError> {
        if file_name == "reject.png" {
            return Err(CdnError::MissingPublicId);
        }
        Ok(UploadedImage {
            public_id: format!("products/{file_name}"),
            secure_url: None,
            width: None,
            height: None,
            format: None,
        })
    }
}

// ---------------------------------------------------------------------------
// App builders
// ---------------------------------------------------------------------------

/// Build the full application router with all middleware layers.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_mailer(pool, Arc::new(RecordingMailer::default()))
}

pub fn build_test_app_with_mailer(pool: PgPool, mailer: Arc<RecordingMailer>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        cdn: Arc::new(test_cdn_config()),
        uploader: Arc::new(FakeUploader),
        mailer,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Identities
// ---------------------------------------------------------------------------

/// Create an identity with the given role and return a bearer token for it.
pub async fn token_for(pool: &PgPool, email: &str, role: Option<Role>) -> String {
    let user = AuthUserRepo::find_or_create_by_email(pool, email)
        .await
        .expect("identity creation should succeed");
    ProfileRepo::find_or_provision(pool, user.id)
        .await
        .expect("profile provisioning should succeed");
    sqlx::query("UPDATE profiles SET role = $2 WHERE id = $1")
        .bind(user.id)
        .bind(role)
        .execute(pool)
        .await
        .expect("role update should succeed");
    test_config()
        .tokens
        .issue_access(user.id, email)
        .expect("token should encode")
}

pub async fn admin_token(pool: &PgPool) -> String {
    token_for(pool, "admin@shop.pk", Some(Role::Admin)).await
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, empty_request("GET", uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, empty_request("GET", uri, Some(token))).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request("POST", uri, None, body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response {
    send(app, json_request("POST", uri, Some(token), body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, empty_request("POST", uri, Some(token))).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response {
    send(app, json_request("PUT", uri, Some(token), body)).await
}

pub async fn put_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, empty_request("PUT", uri, Some(token))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, empty_request("DELETE", uri, Some(token))).await
}

/// POST a multipart body with one `file` part.
pub async fn post_file_auth(
    app: Router,
    uri: &str,
    file_name: &str,
    bytes: &[u8],
    token: &str,
) -> Response {
    let boundary = "storefront-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub fn assert_status(response: &Response, expected: StatusCode) {
    assert_eq!(response.status(), expected, "unexpected status");
}
