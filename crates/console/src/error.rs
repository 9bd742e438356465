use storefront_cdn::CdnError;

/// Errors from the console's calls to the API and the CDN.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-2xx status and its `{error, code}` body.
    #[error("{message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// The form failed a check before any request was sent.
    #[error("{0}")]
    Invalid(String),

    #[error("{0}")]
    Cdn(#[from] CdnError),
}

impl ClientError {
    /// HTTP status of an API rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
