//! Handlers for `/admin/products/{id}/images`.
//!
//! The image rows hold CDN public ids. Removing a row detaches the image
//! from the product; the asset itself stays on the CDN.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use storefront_cdn::{CdnConfig, Transformation};
use storefront_core::error::CoreError;
use storefront_core::types::DbId;
use storefront_db::models::product_image::{AddProductImage, ProductImage};
use storefront_db::repositories::{ProductImageRepo, ProductRepo};

use crate::error::{AppError, AppResult};
use crate::extract::parse_id;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

const IMAGE_ENTITY: &str = "Product image";

/// An image row plus its derived thumbnail URL.
#[derive(Debug, Serialize)]
pub struct ImageView {
    #[serde(flatten)]
    pub image: ProductImage,
    pub thumbnail_url: String,
}

impl ImageView {
    pub fn new(image: ProductImage, cdn: &CdnConfig) -> Self {
        let thumbnail_url = cdn.delivery_url(&image.image_url, &Transformation::thumbnail());
        Self {
            image,
            thumbnail_url,
        }
    }
}

/// GET /api/v1/admin/products/{id}/images
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Vec<ImageView>>> {
    let product_id = ensure_product(&state, &raw_id).await?;
    let images = ProductImageRepo::list_for_product(&state.pool, product_id)
        .await?
        .into_iter()
        .map(|image| ImageView::new(image, &state.cdn))
        .collect();
    Ok(Json(images))
}

/// POST /api/v1/admin/products/{id}/images
///
/// Attaches an already-uploaded asset. Without `is_primary` the image is
/// primary exactly when the product has no primary image yet. An explicit
/// `is_primary: true` while a primary exists is a 409.
pub async fn add(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(input): Json<AddProductImage>,
) -> AppResult<(StatusCode, Json<ImageView>)> {
    let product_id = ensure_product(&state, &raw_id).await?;
    let public_id = input.public_id.trim();
    if public_id.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "public_id is required".into(),
        )));
    }

    let image = match input.is_primary {
        None => ProductImageRepo::add_auto_primary(&state.pool, product_id, public_id).await?,
        Some(is_primary) => {
            ProductImageRepo::add(&state.pool, product_id, public_id, is_primary).await?
        }
    };

    tracing::info!(product_id, image_id = image.id, is_primary = image.is_primary, "Image attached");
    Ok((StatusCode::CREATED, Json(ImageView::new(image, &state.cdn))))
}

/// POST /api/v1/admin/products/{id}/images/upload
///
/// Multipart form with a single `file` field. The file is stored on the CDN
/// and attached with the same auto-primary rule as [`add`].
pub async fn upload(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ImageView>)> {
    let product_id = ensure_product(&state, &raw_id).await?;

    let mut file: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Could not read file: {e}")))?;
        file = Some((file_name, bytes.to_vec()));
        break;
    }

    let (file_name, bytes) =
        file.ok_or_else(|| AppError::BadRequest("Missing `file` field".into()))?;
    if bytes.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }

    let uploaded = state.uploader.upload(&file_name, bytes).await?;
    let image =
        ProductImageRepo::add_auto_primary(&state.pool, product_id, &uploaded.public_id).await?;

    tracing::info!(
        product_id,
        image_id = image.id,
        public_id = %uploaded.public_id,
        is_primary = image.is_primary,
        "Image uploaded and attached"
    );
    Ok((StatusCode::CREATED, Json(ImageView::new(image, &state.cdn))))
}

/// PUT /api/v1/admin/products/{id}/images/{image_id}/primary
///
/// The previous primary is cleared in the same transaction.
pub async fn set_primary(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path((raw_id, raw_image_id)): Path<(String, String)>,
) -> AppResult<Json<ImageView>> {
    let product_id = parse_id("Product", &raw_id)?;
    let image_id = parse_id(IMAGE_ENTITY, &raw_image_id)?;

    let image = ProductImageRepo::set_primary(&state.pool, product_id, image_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: IMAGE_ENTITY,
            id: image_id,
        }))?;

    tracing::info!(product_id, image_id, "Primary image set");
    Ok(Json(ImageView::new(image, &state.cdn)))
}

/// DELETE /api/v1/admin/products/{id}/images/{image_id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path((raw_id, raw_image_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let product_id = parse_id("Product", &raw_id)?;
    let image_id = parse_id(IMAGE_ENTITY, &raw_image_id)?;

    if ProductImageRepo::delete_for_product(&state.pool, product_id, image_id).await? {
        tracing::info!(product_id, image_id, "Image detached");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: IMAGE_ENTITY,
            id: image_id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse the product id and make sure the product exists.
async fn ensure_product(state: &AppState, raw_id: &str) -> AppResult<DbId> {
    let id = parse_id("Product", raw_id)?;
    ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    Ok(id)
}
