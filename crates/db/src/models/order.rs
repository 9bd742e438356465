//! Order and order-item models. Read-only in this service.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::types::{DbId, Timestamp, UserId};

/// A row from the `orders` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: DbId,
    pub user_id: Option<UserId>,
    pub status: Option<String>,
    pub total_amount: Option<f64>,
    pub payment_method: Option<String>,
    pub created_at: Timestamp,
}

/// A row from the `order_items` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub id: DbId,
    pub order_id: Option<DbId>,
    pub product_id: Option<DbId>,
    pub quantity: i32,
    pub price: f64,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// An order together with its line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}
