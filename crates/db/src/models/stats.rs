//! Aggregate counts for the admin dashboard.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, FromRow, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminStats {
    pub categories: i64,
    pub sections: i64,
    pub fabrics: i64,
    pub products: i64,
    pub orders: i64,
}
