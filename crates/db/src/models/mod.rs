//! Table rows and the payloads that write them.
//!
//! Catalog entities pair a row struct with `CreateX` and `UpdateX` inputs.
//! Update inputs are all-optional; absent fields keep their stored value.

pub mod auth;
pub mod category;
pub mod fabric;
pub mod order;
pub mod product;
pub mod product_image;
pub mod profile;
pub mod section;
pub mod stats;
