//! Repository for the `profiles` table.

use sqlx::PgPool;
use storefront_core::types::UserId;

use crate::models::profile::Profile;

const COLUMNS: &str = "id, full_name, phone_number, address, role, created_at";

pub struct ProfileRepo;

impl ProfileRepo {
    /// Return the user's profile, creating it with role `user` if missing.
    ///
    /// The insert is conflict-tolerant and shares a transaction with the
    /// read, so concurrent first lookups for the same id produce one row and
    /// all observe it. An existing row's role is returned as stored,
    /// including NULL.
    pub async fn find_or_provision(pool: &PgPool, id: UserId) -> Result<Profile, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO profiles (id, role) VALUES ($1, 'user')
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        let profile = sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        if inserted.rows_affected() > 0 {
            tracing::info!(user_id = %id, "Provisioned profile with default role");
        }
        Ok(profile)
    }
}
