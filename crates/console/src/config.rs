/// Console configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Base URL of the API including the version prefix.
    pub api_base_url: String,
    /// Access token from an earlier sign-in, restored on start-up.
    pub access_token: Option<String>,
}

impl ConsoleConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var               | Default                         |
    /// |-----------------------|---------------------------------|
    /// | `STOREFRONT_API_URL`  | `http://localhost:3000/api/v1`  |
    /// | `STOREFRONT_TOKEN`    | unset                           |
    pub fn from_env() -> Self {
        let api_base_url = std::env::var("STOREFRONT_API_URL")
            .unwrap_or_else(|_| "http://localhost:3000/api/v1".into());
        let access_token = std::env::var("STOREFRONT_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        Self::new(api_base_url, access_token)
    }

    pub fn new(api_base_url: impl Into<String>, access_token: Option<String>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            access_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped() {
        let config = ConsoleConfig::new("http://api.test/api/v1/", None);
        assert_eq!(config.api_base_url, "http://api.test/api/v1");
    }
}
