//! Category entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::patch::double_option;
use storefront_core::search::Named;
use storefront_core::types::{DbId, Timestamp};

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub slug: Option<String>,
    pub created_at: Timestamp,
}

impl Named for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

/// DTO for creating a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub slug: Option<String>,
}

/// DTO for updating a category. All fields are optional; a `null` slug
/// clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCategory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub slug: Option<Option<String>>,
}
