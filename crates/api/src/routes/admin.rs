//! Back-office routes. Every handler behind this router takes
//! [`RequireAdmin`](crate::middleware::rbac::RequireAdmin).

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{category, dashboard, fabric, order, product, product_image, section};
use crate::state::AppState;

/// Largest product photo accepted by the upload route.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /dashboard                                  -> dashboard::stats
///
/// GET    /categories                                 -> category::list
/// POST   /categories                                 -> category::create
/// PUT    /categories/{id}                            -> category::update
/// DELETE /categories/{id}                            -> category::delete
///   (same shape for /sections, /fabrics, /products)
/// GET    /products/{id}                              -> product::get_by_id
///
/// GET    /products/{id}/images                       -> product_image::list
/// POST   /products/{id}/images                       -> product_image::add
/// POST   /products/{id}/images/upload                -> product_image::upload
/// PUT    /products/{id}/images/{image_id}/primary    -> product_image::set_primary
/// DELETE /products/{id}/images/{image_id}            -> product_image::delete
///
/// GET    /orders                                     -> order::list
/// GET    /orders/{id}                                -> order::get_by_id
/// ```
pub fn router() -> Router<AppState> {
    let image_routes = Router::new()
        .route("/", get(product_image::list).post(product_image::add))
        .route(
            "/upload",
            post(product_image::upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/{image_id}", axum::routing::delete(product_image::delete))
        .route("/{image_id}/primary", put(product_image::set_primary));

    Router::new()
        .route("/dashboard", get(dashboard::stats))
        .route("/categories", get(category::list).post(category::create))
        .route(
            "/categories/{id}",
            put(category::update).delete(category::delete),
        )
        .route("/sections", get(section::list).post(section::create))
        .route("/sections/{id}", put(section::update).delete(section::delete))
        .route("/fabrics", get(fabric::list).post(fabric::create))
        .route("/fabrics/{id}", put(fabric::update).delete(fabric::delete))
        .route("/products", get(product::list).post(product::create))
        .route(
            "/products/{id}",
            get(product::get_by_id)
                .put(product::update)
                .delete(product::delete),
        )
        .nest("/products/{id}/images", image_routes)
        .route("/orders", get(order::list))
        .route("/orders/{id}", get(order::get_by_id))
}
