//! Image manager for one product.
//!
//! Files go straight to the CDN through an [`ImageUploader`]; only the
//! returned `public_id` is sent to the API. The API decides whether a new
//! image becomes primary, so the manager never has to guess from its own
//! possibly stale list.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use storefront_cdn::ImageUploader;
use storefront_core::sequence::{LoadSequencer, LoadTicket};
use storefront_core::types::DbId;
use storefront_db::models::product_image::ProductImage;
use tokio::sync::Mutex;

use crate::client::ApiClient;
use crate::error::ClientError;

/// An image row as the API returns it, with a ready-made thumbnail URL.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ManagedImage {
    #[serde(flatten)]
    pub image: ProductImage,
    pub thumbnail_url: String,
}

impl ManagedImage {
    pub fn id(&self) -> DbId {
        self.image.id
    }

    pub fn is_primary(&self) -> bool {
        self.image.is_primary
    }
}

#[async_trait]
pub trait ImageBackend: Send + Sync {
    /// Images of a product, oldest first.
    async fn list(&self, product_id: DbId) -> Result<Vec<ManagedImage>, ClientError>;

    /// Attach an uploaded asset. It becomes primary only if the product has
    /// no primary image yet.
    async fn attach(&self, product_id: DbId, public_id: &str) -> Result<ManagedImage, ClientError>;

    async fn set_primary(&self, product_id: DbId, image_id: DbId) -> Result<ManagedImage, ClientError>;

    /// Remove the association. The CDN asset stays.
    async fn detach(&self, product_id: DbId, image_id: DbId) -> Result<(), ClientError>;
}

#[async_trait]
impl ImageBackend for ApiClient {
    async fn list(&self, product_id: DbId) -> Result<Vec<ManagedImage>, ClientError> {
        self.get(&format!("/admin/products/{product_id}/images")).await
    }

    async fn attach(&self, product_id: DbId, public_id: &str) -> Result<ManagedImage, ClientError> {
        self.post(
            &format!("/admin/products/{product_id}/images"),
            &json!({ "public_id": public_id }),
        )
        .await
    }

    async fn set_primary(&self, product_id: DbId, image_id: DbId) -> Result<ManagedImage, ClientError> {
        self.put_empty(&format!(
            "/admin/products/{product_id}/images/{image_id}/primary"
        ))
        .await
    }

    async fn detach(&self, product_id: DbId, image_id: DbId) -> Result<(), ClientError> {
        self.delete(&format!("/admin/products/{product_id}/images/{image_id}"))
            .await
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImageState {
    pub images: Vec<ManagedImage>,
    pub loading: bool,
    pub uploading: bool,
    pub error: Option<String>,
}

/// Confirmation token for removing one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingImageDelete {
    image_id: DbId,
}

impl PendingImageDelete {
    pub fn image_id(&self) -> DbId {
        self.image_id
    }
}

struct Inner {
    state: ImageState,
    sequencer: LoadSequencer,
}

pub struct ImageManager<B> {
    backend: B,
    uploader: Arc<dyn ImageUploader>,
    product_id: DbId,
    inner: Mutex<Inner>,
}

impl<B: ImageBackend> ImageManager<B> {
    pub fn new(backend: B, uploader: Arc<dyn ImageUploader>, product_id: DbId) -> Self {
        Self {
            backend,
            uploader,
            product_id,
            inner: Mutex::new(Inner {
                state: ImageState::default(),
                sequencer: LoadSequencer::new(),
            }),
        }
    }

    pub fn product_id(&self) -> DbId {
        self.product_id
    }

    pub async fn snapshot(&self) -> ImageState {
        self.inner.lock().await.state.clone()
    }

    pub async fn images(&self) -> Vec<ManagedImage> {
        self.inner.lock().await.state.images.clone()
    }

    pub async fn primary(&self) -> Option<ManagedImage> {
        let inner = self.inner.lock().await;
        inner.state.images.iter().find(|i| i.is_primary()).cloned()
    }

    /// Load the product's images.
    pub async fn open(&self) {
        let ticket = {
            let mut inner = self.inner.lock().await;
            inner.state.loading = true;
            inner.sequencer.issue()
        };
        let result = self.backend.list(self.product_id).await;
        self.apply_load(ticket, result).await;
    }

    async fn apply_load(&self, ticket: LoadTicket, result: Result<Vec<ManagedImage>, ClientError>) {
        let mut inner = self.inner.lock().await;
        if !inner.sequencer.is_current(ticket) {
            return;
        }
        match result {
            Ok(images) => {
                inner.state.images = images;
                inner.state.error = None;
            }
            Err(e) => inner.state.error = Some(e.to_string()),
        }
        inner.state.loading = false;
    }

    /// Upload a file to the CDN, attach it and reload.
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<ManagedImage, ClientError> {
        {
            let mut inner = self.inner.lock().await;
            inner.state.uploading = true;
            inner.state.error = None;
        }

        let result = self.upload_and_attach(file_name, bytes).await;

        {
            let mut inner = self.inner.lock().await;
            inner.state.uploading = false;
            if let Err(e) = &result {
                inner.state.error = Some(e.to_string());
            }
        }

        if result.is_ok() {
            self.open().await;
        }
        result
    }

    async fn upload_and_attach(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<ManagedImage, ClientError> {
        let uploaded = self.uploader.upload(file_name, bytes).await?;
        let image = self
            .backend
            .attach(self.product_id, &uploaded.public_id)
            .await?;
        tracing::info!(
            product_id = self.product_id,
            image_id = image.id(),
            is_primary = image.is_primary(),
            "Image added"
        );
        Ok(image)
    }

    /// Make `image_id` the primary image, then reload.
    pub async fn set_primary(&self, image_id: DbId) -> Result<(), ClientError> {
        match self.backend.set_primary(self.product_id, image_id).await {
            Ok(_) => {
                self.open().await;
                Ok(())
            }
            Err(e) => {
                self.inner.lock().await.state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Start removing an image. `None` when it is not in the list.
    pub async fn request_delete(&self, image_id: DbId) -> Option<PendingImageDelete> {
        let inner = self.inner.lock().await;
        inner
            .state
            .images
            .iter()
            .any(|i| i.id() == image_id)
            .then_some(PendingImageDelete { image_id })
    }

    pub async fn confirm_delete(&self, pending: PendingImageDelete) -> Result<(), ClientError> {
        match self.backend.detach(self.product_id, pending.image_id).await {
            Ok(()) => {
                self.open().await;
                Ok(())
            }
            Err(e) => {
                self.inner.lock().await.state.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
