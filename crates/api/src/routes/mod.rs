pub mod admin;
pub mod auth;
pub mod health;
pub mod storefront;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/otp                                       request sign-in code (public)
/// /auth/verify                                    exchange code for tokens (public)
/// /auth/refresh                                   rotate tokens (public)
/// /auth/logout                                    revoke sessions (auth)
/// /auth/session                                   identity + role (auth)
///
/// /storefront/home                                landing page content
/// /storefront/categories                          categories
/// /storefront/categories/{id}/sections            sections of a category
/// /storefront/fabrics                             fabrics, optionally by season
/// /storefront/products                            paged product listing
/// /storefront/products/{id}                       product detail with images
///
/// /admin/dashboard                                entity counts (admin)
/// /admin/categories[/{id}]                        CRUD (admin)
/// /admin/sections[/{id}]                          CRUD (admin)
/// /admin/fabrics[/{id}]                           CRUD (admin)
/// /admin/products[/{id}]                          CRUD (admin)
/// /admin/products/{id}/images                     list, add (admin)
/// /admin/products/{id}/images/upload              multipart upload (admin)
/// /admin/products/{id}/images/{image_id}          delete (admin)
/// /admin/products/{id}/images/{image_id}/primary  set primary (admin)
/// /admin/orders[/{id}]                            read-only (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/storefront", storefront::router())
        .nest("/admin", admin::router())
}
