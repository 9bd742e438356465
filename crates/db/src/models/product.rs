//! Product entity model, gender enum, DTOs and the paged listing query.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::paging::{PageRequest, SortDirection, SortField};
use storefront_core::patch::double_option;
use storefront_core::search::Named;
use storefront_core::types::{DbId, Timestamp};

use crate::models::fabric::Season;

/// Intended wearer. Maps to the `product_gender` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "product_gender", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Men,
    Women,
    Kids,
    Unisex,
}

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub discount_price: Option<f64>,
    pub stock: Option<i32>,
    pub category_id: Option<DbId>,
    pub section_id: Option<DbId>,
    pub fabric_id: Option<DbId>,
    pub gender: Option<Gender>,
    pub season: Option<Season>,
    pub created_at: Timestamp,
}

impl Product {
    /// Whether at least one unit is available.
    pub fn in_stock(&self) -> bool {
        self.stock.is_some_and(|s| s > 0)
    }

    /// Price the customer pays: the discount price when one is set.
    pub fn effective_price(&self) -> f64 {
        self.discount_price.unwrap_or(self.price)
    }
}

impl Named for Product {
    fn name(&self) -> &str {
        &self.name
    }
}

/// DTO for creating a product. Price is required; stock defaults to 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub discount_price: Option<f64>,
    pub stock: Option<i32>,
    pub category_id: Option<DbId>,
    pub section_id: Option<DbId>,
    pub fabric_id: Option<DbId>,
    pub gender: Option<Gender>,
    pub season: Option<Season>,
}

/// DTO for updating a product. All fields are optional. Nullable columns
/// take `Option<Option<_>>` so that `null` clears them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProduct {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i32>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub section_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub fabric_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub gender: Option<Option<Gender>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub season: Option<Option<Season>>,
}

/// Filters, ordering and page for [`ProductRepo::list_paged`].
///
/// [`ProductRepo::list_paged`]: crate::repositories::ProductRepo::list_paged
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductQuery {
    pub section_id: Option<DbId>,
    pub category_id: Option<DbId>,
    pub in_stock_only: bool,
    pub sort_by: SortField,
    pub sort_dir: SortDirection,
    pub page: PageRequest,
}
