//! Passwordless sign-in.
//!
//! A visitor asks for a code by email, trades the code for a token pair,
//! and later trades the refresh token for a new pair. Role lookups go
//! through `/auth/session` so the console can gate admin screens.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use storefront_core::error::CoreError;
use storefront_core::types::UserId;
use storefront_core::validation::normalize_email;
use storefront_db::models::auth::{AuthUser as Identity, CreateOtpCode, CreateSession};
use storefront_db::models::profile::Role;
use storefront_db::repositories::{AuthUserRepo, OtpRepo, SessionRepo};
use validator::Validate;

use crate::auth::otp::{generate_code, hash_code};
use crate::auth::tokens::{hash_refresh_token, RefreshToken};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::profile_for;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct OtpRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
}

/// The code is on its way; the caller is not signed in yet.
#[derive(Debug, Serialize)]
pub struct OtpSent {
    pub email: String,
    pub expires_in: i64,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Token pair issued by verify and refresh. `expires_in` is in seconds.
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub user: SessionUser,
}

#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub id: UserId,
    pub email: String,
}

/// `role` serializes as `null` for a profile without one.
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub user: SessionUser,
    pub role: Option<Role>,
}

/// POST /api/v1/auth/otp
///
/// Registers the address on first use. Issuing a code retires any earlier
/// unused one for the same address.
pub async fn request_otp(
    State(state): State<AppState>,
    Json(input): Json<OtpRequest>,
) -> AppResult<(StatusCode, Json<OtpSent>)> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;
    let email = normalize_email(&input.email);
    AuthUserRepo::find_or_create_by_email(&state.pool, &email).await?;

    let ttl_mins = state.config.otp.ttl_mins;
    let code = generate_code();
    let pending = CreateOtpCode {
        code_hash: hash_code(&email, &code),
        expires_at: Utc::now() + Duration::minutes(ttl_mins),
        email: email.clone(),
    };
    OtpRepo::create(&state.pool, &pending).await?;
    state.mailer.send_code(&email, &code, ttl_mins).await?;
    tracing::info!(%email, "Sign-in code sent");

    let sent = OtpSent {
        email,
        expires_in: ttl_mins * 60,
    };
    Ok((StatusCode::ACCEPTED, Json(sent)))
}

/// POST /api/v1/auth/verify
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(input): Json<VerifyRequest>,
) -> AppResult<Json<TokenPair>> {
    let email = normalize_email(&input.email);
    let bad_code = || rejected("Invalid or expired code");

    let Some(otp) = OtpRepo::find_active(&state.pool, &email).await? else {
        return Err(bad_code());
    };

    if otp.attempts >= state.config.otp.max_attempts {
        OtpRepo::consume(&state.pool, otp.id).await?;
        return Err(rejected("Too many attempts. Request a new code."));
    }
    if otp.code_hash != hash_code(&email, &input.code) {
        let attempts = OtpRepo::increment_attempts(&state.pool, otp.id).await?;
        tracing::debug!(%email, attempts, "Sign-in code mismatch");
        return Err(bad_code());
    }
    // Losing this race means another request already used the code.
    if !OtpRepo::consume(&state.pool, otp.id).await? {
        return Err(bad_code());
    }

    let identity = AuthUserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(bad_code)?;
    AuthUserRepo::record_sign_in(&state.pool, identity.id).await?;
    tracing::info!(user_id = %identity.id, "Signed in");

    issue_pair(&state, &identity).await.map(Json)
}

/// POST /api/v1/auth/refresh
///
/// The presented token is spent whether or not the new pair is used.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<TokenPair>> {
    let hash = hash_refresh_token(input.refresh_token.trim());
    let session = SessionRepo::redeem(&state.pool, &hash)
        .await?
        .ok_or_else(|| rejected("Invalid or expired refresh token"))?;

    let identity = AuthUserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| rejected("User no longer exists"))?;

    issue_pair(&state, &identity).await.map(Json)
}

/// POST /api/v1/auth/logout
///
/// Ends every session of the caller. Outstanding access tokens stay valid
/// until they expire.
pub async fn logout(State(state): State<AppState>, caller: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, caller.user_id).await?;
    tracing::info!(user_id = %caller.user_id, revoked, "Signed out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/session
pub async fn session(
    State(state): State<AppState>,
    caller: AuthUser,
) -> AppResult<Json<SessionInfo>> {
    let profile = profile_for(&state, &caller).await?;
    Ok(Json(SessionInfo {
        role: profile.role,
        user: SessionUser {
            id: caller.user_id,
            email: caller.email,
        },
    }))
}

async fn issue_pair(state: &AppState, identity: &Identity) -> AppResult<TokenPair> {
    let tokens = &state.config.tokens;
    let access_token = tokens
        .issue_access(identity.id, &identity.email)
        .map_err(|e| AppError::Internal(format!("Could not sign access token: {e}")))?;

    let refresh = RefreshToken::generate();
    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: identity.id,
            refresh_token_hash: refresh.hash,
            expires_at: tokens.refresh_expires_at(),
        },
    )
    .await?;

    Ok(TokenPair {
        access_token,
        refresh_token: refresh.token,
        expires_in: tokens.access_ttl_secs(),
        user: SessionUser {
            id: identity.id,
            email: identity.email.clone(),
        },
    })
}

fn rejected(message: &str) -> AppError {
    CoreError::Unauthorized(message.to_string()).into()
}
