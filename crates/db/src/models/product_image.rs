//! Product image model and DTOs.
//!
//! `image_url` stores the CDN public id, not a full URL; delivery URLs are
//! derived when the row is rendered.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::types::DbId;

/// A row from the `product_images` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct ProductImage {
    pub id: DbId,
    pub product_id: DbId,
    pub image_url: String,
    pub is_primary: bool,
}

/// DTO for attaching an already-uploaded CDN asset to a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddProductImage {
    pub public_id: String,
    /// `None` lets the database decide: the image becomes primary only if
    /// the product has no primary image yet.
    pub is_primary: Option<bool>,
}
