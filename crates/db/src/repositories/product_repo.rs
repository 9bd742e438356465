//! Repository for the `products` table.

use sqlx::PgPool;
use storefront_core::paging::Page;
use storefront_core::types::DbId;

use crate::models::product::{CreateProduct, Product, ProductQuery, UpdateProduct};

const COLUMNS: &str = "id, name, description, price, discount_price, stock, category_id, \
                       section_id, fabric_id, gender, season, created_at";

/// Same columns qualified with the `p` alias for joined queries.
const P_COLUMNS: &str = "p.id, p.name, p.description, p.price, p.discount_price, p.stock, \
                         p.category_id, p.section_id, p.fabric_id, p.gender, p.season, \
                         p.created_at";

/// Shared filter for the paged listing and its count. `$1` is the optional
/// section, `$2` the optional category, `$3` the in-stock flag.
const PAGE_FILTER: &str = "($1::BIGINT IS NULL OR section_id = $1)
               AND ($2::BIGINT IS NULL OR category_id = $2)
               AND ($3 = false OR stock > 0)";

/// Provides CRUD and listing operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the created row. Stock defaults to 0.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products
                (name, description, price, discount_price, stock,
                 category_id, section_id, fabric_id, gender, season)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0), $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.discount_price)
            .bind(input.stock)
            .bind(input.category_id)
            .bind(input.section_id)
            .bind(input.fabric_id)
            .bind(input.gender)
            .bind(input.season)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every product, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
    }

    /// Fetch one page of products plus the exact number of matching rows.
    ///
    /// Sort column and direction come from whitelisted enums; `id` breaks
    /// ties so pages are stable.
    pub async fn list_paged(
        pool: &PgPool,
        params: &ProductQuery,
    ) -> Result<Page<Product>, sqlx::Error> {
        let column = params.sort_by.column();
        let direction = params.sort_dir.keyword();

        let query = format!(
            "SELECT {COLUMNS} FROM products
             WHERE {PAGE_FILTER}
             ORDER BY {column} {direction}, id {direction}
             LIMIT $4 OFFSET $5"
        );
        let data = sqlx::query_as::<_, Product>(&query)
            .bind(params.section_id)
            .bind(params.category_id)
            .bind(params.in_stock_only)
            .bind(params.page.limit())
            .bind(params.page.offset())
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM products WHERE {PAGE_FILTER}");
        let (total,): (i64,) = sqlx::query_as(&count_query)
            .bind(params.section_id)
            .bind(params.category_id)
            .bind(params.in_stock_only)
            .fetch_one(pool)
            .await?;

        Ok(Page { data, total })
    }

    /// Most recently created products.
    pub async fn list_newest(pool: &PgPool, limit: i64) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products ORDER BY created_at DESC, id DESC LIMIT $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Products ranked by total ordered quantity. Products never ordered
    /// are not included.
    pub async fn list_bestsellers(pool: &PgPool, limit: i64) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {P_COLUMNS} FROM products p
             JOIN order_items oi ON oi.product_id = p.id
             GROUP BY p.id
             ORDER BY SUM(oi.quantity) DESC, p.id
             LIMIT $1"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update a product. Absent fields are left alone; a present `None`
    /// sets a nullable column to NULL.
    ///
    /// `discount_price` is checked against the resulting `price` by the
    /// `ck_products_discount` constraint.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                name = COALESCE($2, name),
                price = COALESCE($3, price),
                stock = COALESCE($4, stock),
                description = CASE WHEN $5 THEN $6 ELSE description END,
                discount_price = CASE WHEN $7 THEN $8 ELSE discount_price END,
                category_id = CASE WHEN $9 THEN $10 ELSE category_id END,
                section_id = CASE WHEN $11 THEN $12 ELSE section_id END,
                fabric_id = CASE WHEN $13 THEN $14 ELSE fabric_id END,
                gender = CASE WHEN $15 THEN $16 ELSE gender END,
                season = CASE WHEN $17 THEN $18 ELSE season END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.price)
            .bind(input.stock)
            .bind(input.description.is_some())
            .bind(input.description.as_ref().and_then(|v| v.as_deref()))
            .bind(input.discount_price.is_some())
            .bind(input.discount_price.flatten())
            .bind(input.category_id.is_some())
            .bind(input.category_id.flatten())
            .bind(input.section_id.is_some())
            .bind(input.section_id.flatten())
            .bind(input.fabric_id.is_some())
            .bind(input.fabric_id.flatten())
            .bind(input.gender.is_some())
            .bind(input.gender.flatten())
            .bind(input.season.is_some())
            .bind(input.season.flatten())
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a product. Its images go with it (cascade);
    /// order items keep a NULL `product_id`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
