//! Handlers for the `/admin/products` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use storefront_core::error::CoreError;
use storefront_core::patch::blank_as_null;
use storefront_core::types::DbId;
use storefront_core::validation::{non_blank, require_name, require_name_if_present};
use storefront_db::models::product::{CreateProduct, Product, UpdateProduct};
use storefront_db::repositories::{ProductImageRepo, ProductRepo};

use crate::error::{AppError, AppResult};
use crate::extract::parse_id;
use crate::handlers::product_image::ImageView;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

const ENTITY: &str = "Product";

/// A product with all of its images, primary flag included.
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub images: Vec<ImageView>,
}

/// GET /api/v1/admin/products
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Product>>> {
    let products = ProductRepo::list(&state.pool).await?;
    Ok(Json(products))
}

/// GET /api/v1/admin/products/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ProductDetail>> {
    let id = parse_id(ENTITY, &raw_id)?;
    Ok(Json(load_detail(&state, id).await?))
}

/// POST /api/v1/admin/products
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<Product>)> {
    validate_stock_and_price(Some(input.price), input.discount_price, input.stock)?;
    let input = CreateProduct {
        name: require_name(ENTITY, &input.name)?,
        description: non_blank(input.description.as_deref()),
        ..input
    };

    let product = ProductRepo::create(&state.pool, &input).await?;
    tracing::info!(product_id = product.id, name = %product.name, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/v1/admin/products/{id}
///
/// `null` clears a nullable field. A discount above the stored price is
/// rejected by the database with 400.
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<Json<Product>> {
    let id = parse_id(ENTITY, &raw_id)?;
    validate_stock_and_price(input.price, input.discount_price.flatten(), input.stock)?;
    let input = UpdateProduct {
        name: require_name_if_present(ENTITY, input.name.as_deref())?,
        description: blank_as_null(input.description),
        ..input
    };

    let product = ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(Json(product))
}

/// DELETE /api/v1/admin/products/{id}
///
/// Image rows go with the product; CDN assets are left in place.
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(ENTITY, &raw_id)?;
    if ProductRepo::delete(&state.pool, id).await? {
        tracing::info!(product_id = id, "Product deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a product and its images, or 404.
pub(crate) async fn load_detail(state: &AppState, id: DbId) -> AppResult<ProductDetail> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

    let images = ProductImageRepo::list_for_product(&state.pool, id)
        .await?
        .into_iter()
        .map(|image| ImageView::new(image, &state.cdn))
        .collect();

    Ok(ProductDetail { product, images })
}

/// Reject negative or non-finite prices, negative stock, and a discount
/// above a price sent in the same payload.
fn validate_stock_and_price(
    price: Option<f64>,
    discount_price: Option<f64>,
    stock: Option<i32>,
) -> Result<(), CoreError> {
    for (field, value) in [("price", price), ("discount_price", discount_price)] {
        if let Some(v) = value {
            if !v.is_finite() || v < 0.0 {
                return Err(CoreError::Validation(format!(
                    "{field} must be a non-negative number"
                )));
            }
        }
    }
    if let (Some(price), Some(discount)) = (price, discount_price) {
        if discount > price {
            return Err(CoreError::Validation(
                "discount_price must not exceed price".into(),
            ));
        }
    }
    if stock.is_some_and(|s| s < 0) {
        return Err(CoreError::Validation("stock must not be negative".into()));
    }
    Ok(())
}
