use crate::error::CdnError;
use crate::transform::Transformation;

/// Default upload API root.
const DEFAULT_API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Default delivery root.
const DEFAULT_DELIVERY_BASE: &str = "https://res.cloudinary.com";

/// Connection settings for the image CDN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdnConfig {
    /// Account namespace on the CDN.
    pub cloud_name: String,
    /// Name of the unsigned upload preset.
    pub upload_preset: String,
    /// Upload API root, without trailing slash.
    pub api_base: String,
    /// Delivery root, without trailing slash.
    pub delivery_base: String,
}

impl CdnConfig {
    /// Load CDN configuration from environment variables.
    ///
    /// | Env Var             | Required | Default                           |
    /// |---------------------|----------|-----------------------------------|
    /// | `CDN_CLOUD_NAME`    | **yes**  | --                                |
    /// | `CDN_UPLOAD_PRESET` | **yes**  | --                                |
    /// | `CDN_API_BASE`      | no       | `https://api.cloudinary.com/v1_1` |
    /// | `CDN_DELIVERY_BASE` | no       | `https://res.cloudinary.com`      |
    pub fn from_env() -> Result<Self, CdnError> {
        let cloud_name = required_var("CDN_CLOUD_NAME")?;
        let upload_preset = required_var("CDN_UPLOAD_PRESET")?;

        let api_base = std::env::var("CDN_API_BASE")
            .unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let delivery_base = std::env::var("CDN_DELIVERY_BASE")
            .unwrap_or_else(|_| DEFAULT_DELIVERY_BASE.to_string());

        Ok(Self::new(cloud_name, upload_preset, api_base, delivery_base))
    }

    /// Build a config, trimming trailing slashes from both roots.
    pub fn new(
        cloud_name: impl Into<String>,
        upload_preset: impl Into<String>,
        api_base: impl Into<String>,
        delivery_base: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            upload_preset: upload_preset.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            delivery_base: delivery_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Endpoint that accepts image uploads for this cloud.
    pub fn upload_url(&self) -> String {
        format!("{}/{}/image/upload", self.api_base, self.cloud_name)
    }

    /// Public URL for a stored image with the given transformation applied.
    ///
    /// ```
    /// use storefront_cdn::{CdnConfig, Transformation};
    ///
    /// let config = CdnConfig::new("shop", "unsigned", "https://api.example", "https://cdn.example");
    /// assert_eq!(
    ///     config.delivery_url("products/kurta", &Transformation::thumbnail()),
    ///     "https://cdn.example/shop/image/upload/c_auto,g_auto,h_300,w_300/f_auto/q_auto/products/kurta",
    /// );
    /// ```
    pub fn delivery_url(&self, public_id: &str, transformation: &Transformation) -> String {
        format!(
            "{}/{}/image/upload/{}/{}",
            self.delivery_base,
            self.cloud_name,
            transformation.to_path(),
            public_id
        )
    }
}

fn required_var(name: &str) -> Result<String, CdnError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| CdnError::Config(format!("{name} must be set")))
}
