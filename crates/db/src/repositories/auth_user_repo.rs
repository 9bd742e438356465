//! Repository for the `auth_users` table.

use sqlx::PgPool;
use storefront_core::types::UserId;
use uuid::Uuid;

use crate::models::auth::AuthUser;

const COLUMNS: &str = "id, email, created_at, last_sign_in_at";

pub struct AuthUserRepo;

impl AuthUserRepo {
    /// Return the identity for `email`, creating it on first sign-in.
    ///
    /// `email` must already be normalised.
    pub async fn find_or_create_by_email(pool: &PgPool, email: &str) -> Result<AuthUser, sqlx::Error> {
        let query = format!(
            "INSERT INTO auth_users (id, email) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_auth_users_email
             DO UPDATE SET email = EXCLUDED.email
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuthUser>(&query)
            .bind(Uuid::now_v7())
            .bind(email)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: UserId) -> Result<Option<AuthUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM auth_users WHERE id = $1");
        sqlx::query_as::<_, AuthUser>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<AuthUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM auth_users WHERE email = $1");
        sqlx::query_as::<_, AuthUser>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    pub async fn record_sign_in(pool: &PgPool, id: UserId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE auth_users SET last_sign_in_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
