/// Errors from the image CDN layer.
#[derive(Debug, thiserror::Error)]
pub enum CdnError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The CDN returned a non-2xx status code.
    #[error("CDN API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The CDN accepted the request but did not report a `public_id`.
    #[error("Upload failed")]
    MissingPublicId,

    /// Required configuration is absent.
    #[error("CDN configuration error: {0}")]
    Config(String),
}
