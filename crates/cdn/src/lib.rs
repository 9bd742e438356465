//! Image CDN integration.
//!
//! Uploads go through an unsigned upload preset, so no API secret ever
//! leaves the server configuration. Stored image references are CDN
//! `public_id`s; display URLs are derived on demand with [`delivery_url`].
//!
//! [`delivery_url`]: CdnConfig::delivery_url

pub mod client;
pub mod config;
pub mod error;
pub mod transform;

pub use client::{CdnClient, ImageUploader, UploadedImage};
pub use config::CdnConfig;
pub use error::CdnError;
pub use transform::Transformation;
