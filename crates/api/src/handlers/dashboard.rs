//! Handler for the admin dashboard.

use axum::extract::State;
use axum::Json;
use storefront_db::models::stats::AdminStats;
use storefront_db::repositories::StatsRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/admin/dashboard
///
/// Row counts for each managed table.
pub async fn stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<AdminStats>> {
    let stats = StatsRepo::admin_stats(&state.pool).await?;
    Ok(Json(stats))
}
