//! Handlers for the `/admin/categories` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use storefront_core::error::CoreError;
use storefront_core::patch::blank_as_null;
use storefront_core::slug::resolve_slug;
use storefront_core::validation::{require_name, require_name_if_present};
use storefront_db::models::category::{Category, CreateCategory, UpdateCategory};
use storefront_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::extract::parse_id;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

const ENTITY: &str = "Category";

/// GET /api/v1/admin/categories
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Category>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(categories))
}

/// POST /api/v1/admin/categories
///
/// A blank slug is derived from the name.
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let name = require_name(ENTITY, &input.name)?;
    let input = CreateCategory {
        slug: resolve_slug(input.slug.as_deref(), &name),
        name,
    };

    let category = CategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(category_id = category.id, name = %category.name, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/v1/admin/categories/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<Category>> {
    let id = parse_id(ENTITY, &raw_id)?;
    let input = UpdateCategory {
        name: require_name_if_present(ENTITY, input.name.as_deref())?,
        slug: blank_as_null(input.slug),
    };

    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(Json(category))
}

/// DELETE /api/v1/admin/categories/{id}
///
/// Sections and products in the category keep existing with no category.
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(ENTITY, &raw_id)?;
    if CategoryRepo::delete(&state.pool, id).await? {
        tracing::info!(category_id = id, "Category deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))
    }
}
