//! Upload client for the image CDN.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use crate::config::CdnConfig;
use crate::error::CdnError;

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    /// Stable reference stored in `product_images.image_url`.
    pub public_id: String,
    pub secure_url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub format: Option<String>,
}

/// Raw upload response. `public_id` is optional here so a malformed success
/// body surfaces as [`CdnError::MissingPublicId`] instead of a decode error.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: Option<String>,
    secure_url: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    format: Option<String>,
}

impl TryFrom<UploadResponse> for UploadedImage {
    type Error = CdnError;

    fn try_from(raw: UploadResponse) -> Result<Self, Self::Error> {
        let public_id = raw
            .public_id
            .filter(|id| !id.is_empty())
            .ok_or(CdnError::MissingPublicId)?;
        Ok(Self {
            public_id,
            secure_url: raw.secure_url,
            width: raw.width,
            height: raw.height,
            format: raw.format,
        })
    }
}

/// Anything that can store an image file and hand back its `public_id`.
#[async_trait]
pub trait ImageUploader: Send + Sync {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadedImage, CdnError>;
}

/// HTTP client for unsigned CDN uploads.
pub struct CdnClient {
    client: reqwest::Client,
    config: CdnConfig,
}

impl CdnClient {
    pub fn new(config: CdnConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: CdnConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &CdnConfig {
        &self.config
    }

    /// Ensure the response has a success status code, or turn it into
    /// [`CdnError::ApiError`] carrying the status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, CdnError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(CdnError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ImageUploader for CdnClient {
    /// POST the file and the unsigned preset as multipart form data.
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadedImage, CdnError> {
        let size = bytes.len();
        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name.to_string()))
            .text("upload_preset", self.config.upload_preset.clone());

        let response = self
            .client
            .post(self.config.upload_url())
            .multipart(form)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let image = UploadedImage::try_from(response.json::<UploadResponse>().await?)?;

        tracing::info!(public_id = %image.public_id, file_name, size, "Image uploaded to CDN");
        Ok(image)
    }
}
