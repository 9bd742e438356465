//! Process configuration, read once from the environment at startup.

use std::fmt::Display;
use std::str::FromStr;

use crate::auth::otp::OtpConfig;
use crate::auth::tokens::TokenConfig;

/// Everything the HTTP server needs besides its collaborators.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Browser origins allowed by CORS (`CORS_ORIGINS`, comma separated).
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// How long in-flight requests may run after a shutdown signal.
    pub shutdown_timeout_secs: u64,
    pub tokens: TokenConfig,
    pub otp: OtpConfig,
}

impl ServerConfig {
    /// Defaults suit local development: `0.0.0.0:3000`, the Vite dev origin
    /// `http://localhost:5173`, 30 second request and drain timeouts.
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0".to_string()),
            port: env_or("PORT", 3000),
            cors_origins: split_origins(&env_or(
                "CORS_ORIGINS",
                "http://localhost:5173".to_string(),
            )),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT_SECS", 30),
            tokens: TokenConfig::from_env(),
            otp: OtpConfig::from_env(),
        }
    }
}

/// Parse `key` from the environment, falling back to `default` when unset.
///
/// # Panics
///
/// When the variable is set but does not parse.
pub(crate) fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value {raw:?}: {e}")),
        Err(_) => default,
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_skip_blanks() {
        assert_eq!(
            split_origins("https://shop.pk, ,http://localhost:5173,"),
            vec!["https://shop.pk", "http://localhost:5173"]
        );
    }

    #[test]
    fn unset_variable_uses_default() {
        assert_eq!(env_or("STOREFRONT_TEST_SURELY_UNSET", 42u16), 42);
    }
}
