//! Repository for the `fabrics` table.

use sqlx::PgPool;
use storefront_core::types::DbId;

use crate::models::fabric::{CreateFabric, Fabric, Season, UpdateFabric};

const COLUMNS: &str = "id, name, season, created_at";

/// Provides CRUD operations for fabrics.
pub struct FabricRepo;

impl FabricRepo {
    /// Insert a new fabric. A missing season is stored as `all`.
    pub async fn create(pool: &PgPool, input: &CreateFabric) -> Result<Fabric, sqlx::Error> {
        let query = format!(
            "INSERT INTO fabrics (name, season)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fabric>(&query)
            .bind(&input.name)
            .bind(input.season.unwrap_or_default())
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Fabric>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fabrics ORDER BY name, id");
        sqlx::query_as::<_, Fabric>(&query).fetch_all(pool).await
    }

    /// List fabrics wearable in `season`; fabrics marked `all` always match.
    pub async fn list_for_season(pool: &PgPool, season: Season) -> Result<Vec<Fabric>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM fabrics
             WHERE season = $1 OR season = 'all'
             ORDER BY name, id"
        );
        sqlx::query_as::<_, Fabric>(&query)
            .bind(season)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFabric,
    ) -> Result<Option<Fabric>, sqlx::Error> {
        let query = format!(
            "UPDATE fabrics SET
                name = COALESCE($2, name),
                season = COALESCE($3, season)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fabric>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.season)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM fabrics WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
