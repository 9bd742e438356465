//! Public catalog routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::storefront;
use crate::state::AppState;

/// Routes mounted at `/storefront`.
///
/// ```text
/// GET /home                      -> home
/// GET /categories                -> list_categories
/// GET /categories/{id}/sections  -> list_sections
/// GET /fabrics?season=           -> list_fabrics
/// GET /products                  -> list_products
/// GET /products/{id}             -> get_product
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/home", get(storefront::home))
        .route("/categories", get(storefront::list_categories))
        .route("/categories/{id}/sections", get(storefront::list_sections))
        .route("/fabrics", get(storefront::list_fabrics))
        .route("/products", get(storefront::list_products))
        .route("/products/{id}", get(storefront::get_product))
}
