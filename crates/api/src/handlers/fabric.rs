//! Handlers for the `/admin/fabrics` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use storefront_core::error::CoreError;
use storefront_core::validation::{require_name, require_name_if_present};
use storefront_db::models::fabric::{CreateFabric, Fabric, UpdateFabric};
use storefront_db::repositories::FabricRepo;

use crate::error::{AppError, AppResult};
use crate::extract::parse_id;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

const ENTITY: &str = "Fabric";

/// GET /api/v1/admin/fabrics
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Fabric>>> {
    let fabrics = FabricRepo::list(&state.pool).await?;
    Ok(Json(fabrics))
}

/// POST /api/v1/admin/fabrics
///
/// Season defaults to `all`.
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateFabric>,
) -> AppResult<(StatusCode, Json<Fabric>)> {
    let input = CreateFabric {
        name: require_name(ENTITY, &input.name)?,
        season: input.season,
    };

    let fabric = FabricRepo::create(&state.pool, &input).await?;
    tracing::info!(fabric_id = fabric.id, season = fabric.season.as_str(), "Fabric created");
    Ok((StatusCode::CREATED, Json(fabric)))
}

/// PUT /api/v1/admin/fabrics/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(input): Json<UpdateFabric>,
) -> AppResult<Json<Fabric>> {
    let id = parse_id(ENTITY, &raw_id)?;
    let input = UpdateFabric {
        name: require_name_if_present(ENTITY, input.name.as_deref())?,
        season: input.season,
    };

    let fabric = FabricRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(Json(fabric))
}

/// DELETE /api/v1/admin/fabrics/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(ENTITY, &raw_id)?;
    if FabricRepo::delete(&state.pool, id).await? {
        tracing::info!(fabric_id = id, "Fabric deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))
    }
}
