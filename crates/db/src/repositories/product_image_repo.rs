//! Repository for the `product_images` table.
//!
//! At most one image per product is primary. The partial unique index
//! `uq_product_images_primary` enforces it; the methods here never leave a
//! product with a half-applied primary switch.

use sqlx::PgPool;
use storefront_core::types::DbId;

use crate::models::product_image::ProductImage;

const COLUMNS: &str = "id, product_id, image_url, is_primary";

/// Provides operations for product images.
pub struct ProductImageRepo;

impl ProductImageRepo {
    /// List a product's images in insertion order.
    pub async fn list_for_product(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<ProductImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM product_images WHERE product_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, ProductImage>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    /// Primary images of several products in one round trip. Products
    /// without a primary image are simply absent from the result.
    pub async fn list_primary_for_products(
        pool: &PgPool,
        product_ids: &[DbId],
    ) -> Result<Vec<ProductImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM product_images
             WHERE product_id = ANY($1) AND is_primary"
        );
        sqlx::query_as::<_, ProductImage>(&query)
            .bind(product_ids)
            .fetch_all(pool)
            .await
    }

    /// Insert one image row with the given primary flag.
    ///
    /// Other rows are left untouched. Asking for a second primary fails with
    /// a unique violation on `uq_product_images_primary`.
    pub async fn add(
        pool: &PgPool,
        product_id: DbId,
        public_id: &str,
        is_primary: bool,
    ) -> Result<ProductImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO product_images (product_id, image_url, is_primary)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductImage>(&query)
            .bind(product_id)
            .bind(public_id)
            .bind(is_primary)
            .fetch_one(pool)
            .await
    }

    /// Insert an image that becomes primary only if the product has none.
    ///
    /// The primary attempt and the fallback run in one transaction, and the
    /// unique index arbitrates concurrent uploads: exactly one of them wins
    /// the primary slot.
    pub async fn add_auto_primary(
        pool: &PgPool,
        product_id: DbId,
        public_id: &str,
    ) -> Result<ProductImage, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let primary_query = format!(
            "INSERT INTO product_images (product_id, image_url, is_primary)
             VALUES ($1, $2, true)
             ON CONFLICT (product_id) WHERE is_primary DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, ProductImage>(&primary_query)
            .bind(product_id)
            .bind(public_id)
            .fetch_optional(&mut *tx)
            .await?;

        let image = match inserted {
            Some(image) => image,
            None => {
                let fallback_query = format!(
                    "INSERT INTO product_images (product_id, image_url, is_primary)
                     VALUES ($1, $2, false)
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, ProductImage>(&fallback_query)
                    .bind(product_id)
                    .bind(public_id)
                    .fetch_one(&mut *tx)
                    .await?
            }
        };

        tx.commit().await?;
        Ok(image)
    }

    /// Make `image_id` the product's only primary image.
    ///
    /// Clearing the old primary and setting the new one happen in one
    /// transaction. Returns `None`, with nothing changed, when the image does
    /// not exist or belongs to another product.
    pub async fn set_primary(
        pool: &PgPool,
        product_id: DbId,
        image_id: DbId,
    ) -> Result<Option<ProductImage>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "UPDATE product_images SET is_primary = false
             WHERE product_id = $1 AND is_primary",
        )
        .bind(product_id)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "UPDATE product_images SET is_primary = true
             WHERE id = $1 AND product_id = $2
             RETURNING {COLUMNS}"
        );
        let image = sqlx::query_as::<_, ProductImage>(&query)
            .bind(image_id)
            .bind(product_id)
            .fetch_optional(&mut *tx)
            .await?;

        match image {
            Some(image) => {
                tx.commit().await?;
                tracing::debug!(product_id, image_id, "Primary image switched");
                Ok(Some(image))
            }
            None => {
                tx.rollback().await?;
                Ok(None)
            }
        }
    }

    /// Delete an image only if it belongs to `product_id`.
    pub async fn delete_for_product(
        pool: &PgPool,
        product_id: DbId,
        image_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM product_images WHERE id = $1 AND product_id = $2")
            .bind(image_id)
            .bind(product_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
