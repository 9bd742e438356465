//! Fabric entity model, season enum and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::search::Named;
use storefront_core::types::{DbId, Timestamp};

/// Season a fabric (or product) is meant for. Maps to the `fabric_season`
/// Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "fabric_season", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Summer,
    Winter,
    #[default]
    All,
}

impl Season {
    pub fn as_str(self) -> &'static str {
        match self {
            Season::Summer => "summer",
            Season::Winter => "winter",
            Season::All => "all",
        }
    }
}

/// A row from the `fabrics` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct Fabric {
    pub id: DbId,
    pub name: String,
    pub season: Season,
    pub created_at: Timestamp,
}

impl Named for Fabric {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateFabric {
    pub name: String,
    /// Defaults to `all` when omitted.
    pub season: Option<Season>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFabric {
    pub name: Option<String>,
    pub season: Option<Season>,
}
