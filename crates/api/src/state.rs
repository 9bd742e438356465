use std::sync::Arc;

use storefront_cdn::{CdnConfig, ImageUploader};

use crate::auth::mailer::OtpMailer;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference-counted and everything else is
/// behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: storefront_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// CDN settings, used to derive delivery URLs.
    pub cdn: Arc<CdnConfig>,
    /// Stores uploaded image files on the CDN.
    pub uploader: Arc<dyn ImageUploader>,
    /// Delivers sign-in passcodes.
    pub mailer: Arc<dyn OtpMailer>,
}
