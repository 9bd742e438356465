//! Route parameter parsing.
//!
//! Ids are taken as raw strings and parsed here, so a non-numeric id yields
//! the same 404 JSON body as a missing row instead of axum's plain-text 400.

use storefront_core::error::CoreError;
use storefront_core::types::DbId;

use crate::error::AppError;

/// Parse a numeric route id for `entity`.
pub fn parse_id(entity: &'static str, raw: &str) -> Result<DbId, AppError> {
    raw.parse::<DbId>().map_err(|_| {
        AppError::Core(CoreError::InvalidId {
            entity,
            raw: raw.to_string(),
        })
    })
}
