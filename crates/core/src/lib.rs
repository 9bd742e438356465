//! Storefront domain building blocks with no I/O.
//!
//! Shared by the database layer, the HTTP API and the admin console:
//! error taxonomy, id aliases, paging policy, nullable patch fields,
//! client-side search, slugs, field validation, load sequencing and the
//! storefront landing content.

pub mod error;
pub mod paging;
pub mod patch;
pub mod search;
pub mod sequence;
pub mod slug;
pub mod storefront;
pub mod types;
pub mod validation;
