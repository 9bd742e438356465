//! Section entity model and DTOs.
//!
//! A section groups products inside a category (e.g. a seasonal collection).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::patch::double_option;
use storefront_core::search::Named;
use storefront_core::types::{DbId, Timestamp};

/// A row from the `sections` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct Section {
    pub id: DbId,
    pub category_id: Option<DbId>,
    pub name: String,
    pub slug: Option<String>,
    pub created_at: Timestamp,
}

impl Named for Section {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSection {
    pub name: String,
    pub slug: Option<String>,
    pub category_id: Option<DbId>,
}

/// DTO for updating a section. A `null` slug or category clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub slug: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Option<DbId>>,
}
