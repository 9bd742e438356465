//! Dashboard counters.

use sqlx::PgPool;

use crate::models::stats::AdminStats;

pub struct StatsRepo;

impl StatsRepo {
    /// Exact row counts of the catalog and order tables in one round trip.
    pub async fn admin_stats(pool: &PgPool) -> Result<AdminStats, sqlx::Error> {
        sqlx::query_as::<_, AdminStats>(
            "SELECT
                (SELECT COUNT(*) FROM categories) AS categories,
                (SELECT COUNT(*) FROM sections)   AS sections,
                (SELECT COUNT(*) FROM fabrics)    AS fabrics,
                (SELECT COUNT(*) FROM products)   AS products,
                (SELECT COUNT(*) FROM orders)     AS orders",
        )
        .fetch_one(pool)
        .await
    }
}
