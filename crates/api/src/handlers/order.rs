//! Read-only handlers for `/admin/orders`.

use axum::extract::{Path, State};
use axum::Json;
use storefront_core::error::CoreError;
use storefront_db::models::order::{Order, OrderWithItems};
use storefront_db::repositories::OrderRepo;

use crate::error::{AppError, AppResult};
use crate::extract::parse_id;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/admin/orders
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = OrderRepo::list(&state.pool).await?;
    Ok(Json(orders))
}

/// GET /api/v1/admin/orders/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<OrderWithItems>> {
    let id = parse_id("Order", &raw_id)?;
    let order = OrderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Order", id }))?;
    let items = OrderRepo::list_items(&state.pool, id).await?;
    Ok(Json(OrderWithItems { order, items }))
}
