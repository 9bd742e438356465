//! Identity rows: auth users, one-time passcodes and refresh sessions.

use serde::Serialize;
use sqlx::FromRow;
use storefront_core::types::{DbId, Timestamp, UserId};

/// A row from the `auth_users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuthUser {
    pub id: UserId,
    pub email: String,
    pub created_at: Timestamp,
    pub last_sign_in_at: Option<Timestamp>,
}

/// A row from the `auth_otps` table. Only the code's hash is stored.
#[derive(Debug, Clone, FromRow)]
pub struct OtpCode {
    pub id: DbId,
    pub email: String,
    pub code_hash: String,
    pub expires_at: Timestamp,
    pub consumed_at: Option<Timestamp>,
    pub attempts: i32,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateOtpCode {
    pub email: String,
    pub code_hash: String,
    pub expires_at: Timestamp,
}

/// A row from the `user_sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: UserId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateSession {
    pub user_id: UserId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
