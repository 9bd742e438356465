//! State layer of the admin console.
//!
//! Talks to `storefront-api` over HTTP and keeps what the back-office
//! screens render: the signed-in session and its role, one list-and-form
//! state per catalog resource, and the product image manager.

pub mod client;
pub mod config;
pub mod error;
pub mod images;
pub mod resources;
pub mod screen;
pub mod session;

pub use client::ApiClient;
pub use config::ConsoleConfig;
pub use error::ClientError;
