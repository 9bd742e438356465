//! Repository for the `auth_otps` table.

use sqlx::PgPool;
use storefront_core::types::DbId;

use crate::models::auth::{CreateOtpCode, OtpCode};

const COLUMNS: &str = "id, email, code_hash, expires_at, consumed_at, attempts, created_at";

pub struct OtpRepo;

impl OtpRepo {
    /// Store a new code and retire every earlier unconsumed code for the
    /// same address, so only the latest emailed code works.
    pub async fn create(pool: &PgPool, input: &CreateOtpCode) -> Result<OtpCode, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "UPDATE auth_otps SET consumed_at = NOW()
             WHERE email = $1 AND consumed_at IS NULL",
        )
        .bind(&input.email)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "INSERT INTO auth_otps (email, code_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let code = sqlx::query_as::<_, OtpCode>(&query)
            .bind(&input.email)
            .bind(&input.code_hash)
            .bind(input.expires_at)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(code)
    }

    /// The newest unconsumed, unexpired code for `email`.
    pub async fn find_active(pool: &PgPool, email: &str) -> Result<Option<OtpCode>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM auth_otps
             WHERE email = $1 AND consumed_at IS NULL AND expires_at > NOW()
             ORDER BY created_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, OtpCode>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Mark a code used. Returns `false` if it was already consumed, which
    /// makes a code single-use even under concurrent verification.
    pub async fn consume(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE auth_otps SET consumed_at = NOW() WHERE id = $1 AND consumed_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record a failed verification attempt, returning the new count.
    pub async fn increment_attempts(pool: &PgPool, id: DbId) -> Result<i32, sqlx::Error> {
        let (attempts,): (i32,) = sqlx::query_as(
            "UPDATE auth_otps SET attempts = attempts + 1 WHERE id = $1 RETURNING attempts",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(attempts)
    }

    /// Remove expired codes. Returns the number of rows deleted.
    pub async fn delete_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM auth_otps WHERE expires_at <= NOW()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
