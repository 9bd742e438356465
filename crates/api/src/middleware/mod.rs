//! Request extractors for signed-in callers.
//!
//! [`auth::AuthUser`] needs a valid bearer token; [`rbac::RequireAdmin`]
//! additionally needs the `admin` role.

pub mod auth;
pub mod rbac;
