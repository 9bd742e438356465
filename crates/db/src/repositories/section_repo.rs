//! Repository for the `sections` table.

use sqlx::PgPool;
use storefront_core::types::DbId;

use crate::models::section::{CreateSection, Section, UpdateSection};

const COLUMNS: &str = "id, category_id, name, slug, created_at";

/// Provides CRUD operations for sections.
pub struct SectionRepo;

impl SectionRepo {
    pub async fn create(pool: &PgPool, input: &CreateSection) -> Result<Section, sqlx::Error> {
        let query = format!(
            "INSERT INTO sections (category_id, name, slug)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Section>(&query)
            .bind(input.category_id)
            .bind(&input.name)
            .bind(&input.slug)
            .fetch_one(pool)
            .await
    }

    /// List all sections alphabetically by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Section>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sections ORDER BY name, id");
        sqlx::query_as::<_, Section>(&query).fetch_all(pool).await
    }

    /// List the sections of one category alphabetically by name.
    pub async fn list_by_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<Section>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sections WHERE category_id = $1 ORDER BY name, id"
        );
        sqlx::query_as::<_, Section>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Update a section. Absent fields are left alone; a present `None`
    /// sets the column to NULL.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSection,
    ) -> Result<Option<Section>, sqlx::Error> {
        let query = format!(
            "UPDATE sections SET
                category_id = CASE WHEN $2 THEN $3 ELSE category_id END,
                name = COALESCE($4, name),
                slug = CASE WHEN $5 THEN $6 ELSE slug END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Section>(&query)
            .bind(id)
            .bind(input.category_id.is_some())
            .bind(input.category_id.flatten())
            .bind(&input.name)
            .bind(input.slug.is_some())
            .bind(input.slug.as_ref().and_then(|v| v.as_deref()))
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a section. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sections WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
