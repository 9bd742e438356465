//! Handlers for the `/admin/sections` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use storefront_core::error::CoreError;
use storefront_core::patch::blank_as_null;
use storefront_core::slug::resolve_slug;
use storefront_core::validation::{require_name, require_name_if_present};
use storefront_db::models::section::{CreateSection, Section, UpdateSection};
use storefront_db::repositories::SectionRepo;

use crate::error::{AppError, AppResult};
use crate::extract::parse_id;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

const ENTITY: &str = "Section";

/// GET /api/v1/admin/sections
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Section>>> {
    let sections = SectionRepo::list(&state.pool).await?;
    Ok(Json(sections))
}

/// POST /api/v1/admin/sections
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateSection>,
) -> AppResult<(StatusCode, Json<Section>)> {
    let name = require_name(ENTITY, &input.name)?;
    let input = CreateSection {
        slug: resolve_slug(input.slug.as_deref(), &name),
        name,
        category_id: input.category_id,
    };

    let section = SectionRepo::create(&state.pool, &input).await?;
    tracing::info!(section_id = section.id, category_id = ?section.category_id, "Section created");
    Ok((StatusCode::CREATED, Json(section)))
}

/// PUT /api/v1/admin/sections/{id}
///
/// `"category_id": null` detaches the section from its category.
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(input): Json<UpdateSection>,
) -> AppResult<Json<Section>> {
    let id = parse_id(ENTITY, &raw_id)?;
    let input = UpdateSection {
        name: require_name_if_present(ENTITY, input.name.as_deref())?,
        slug: blank_as_null(input.slug),
        category_id: input.category_id,
    };

    let section = SectionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(Json(section))
}

/// DELETE /api/v1/admin/sections/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(ENTITY, &raw_id)?;
    if SectionRepo::delete(&state.pool, id).await? {
        tracing::info!(section_id = id, "Section deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))
    }
}
