//! Patch payload fields that can clear a nullable column.
//!
//! A patch field typed `Option<Option<T>>` reads as:
//!
//! - key missing: `None`, leave the column alone
//! - `null`: `Some(None)`, set the column to NULL
//! - a value: `Some(Some(v))`
//!
//! Serde collapses a missing key and `null` into the same `None` for a plain
//! `Option<Option<T>>`, so fields use [`double_option`] together with
//! `#[serde(default)]`.

use serde::{Deserialize, Deserializer};

use crate::validation::non_blank;

/// Deserializer for `Option<Option<T>>` patch fields. Pair with
/// `#[serde(default)]` so a missing key stays `None`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Treat blank text in a patch field as an explicit clear.
pub fn blank_as_null(value: Option<Option<String>>) -> Option<Option<String>> {
    value.map(|v| non_blank(v.as_deref()))
}
