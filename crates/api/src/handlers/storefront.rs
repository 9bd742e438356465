//! Public storefront handlers. No authentication.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use storefront_cdn::{CdnConfig, Transformation};
use storefront_core::error::CoreError;
use storefront_core::storefront::{
    featured_tiles, hero_slides, FeaturedTile, HeroSlide, ShowcaseTab, HERO_ROTATION_SECS,
    SHOWCASE_LIMIT,
};
use storefront_core::types::DbId;
use storefront_db::models::category::Category;
use storefront_db::models::fabric::{Fabric, Season};
use storefront_db::models::product::{Product, ProductQuery};
use storefront_db::models::section::Section;
use storefront_db::repositories::{
    CategoryRepo, FabricRepo, ProductImageRepo, ProductRepo, SectionRepo,
};

use crate::error::{AppError, AppResult};
use crate::extract::parse_id;
use crate::handlers::product::{load_detail, ProductDetail};
use crate::query::ProductListParams;
use crate::response::{DataResponse, PagedResponse};
use crate::state::AppState;

/// Size of product card images.
const CARD_TRANSFORM: Transformation = Transformation {
    width: 600,
    height: 800,
};

/// A product as shown in a grid: the row plus its primary image, if any.
#[derive(Debug, Serialize)]
pub struct ProductCard {
    #[serde(flatten)]
    pub product: Product,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Showcase {
    pub tab: ShowcaseTab,
    pub label: &'static str,
    pub products: Vec<ProductCard>,
}

/// Everything the landing page renders.
#[derive(Debug, Serialize)]
pub struct HomePage {
    pub hero: Vec<HeroSlide>,
    pub hero_rotation_secs: u64,
    pub featured: Vec<FeaturedTile>,
    pub showcases: Vec<Showcase>,
}

/// GET /api/v1/storefront/home
pub async fn home(State(state): State<AppState>) -> AppResult<Json<HomePage>> {
    let mut showcases = Vec::with_capacity(ShowcaseTab::ALL.len());
    for tab in ShowcaseTab::ALL {
        let products = match tab {
            ShowcaseTab::Bestsellers => ProductRepo::list_bestsellers(&state.pool, SHOWCASE_LIMIT).await?,
            ShowcaseTab::NewArrivals => ProductRepo::list_newest(&state.pool, SHOWCASE_LIMIT).await?,
        };
        showcases.push(Showcase {
            tab,
            label: tab.label(),
            products: to_cards(&state, products).await?,
        });
    }

    Ok(Json(HomePage {
        hero: hero_slides(),
        hero_rotation_secs: HERO_ROTATION_SECS,
        featured: featured_tiles(),
        showcases,
    }))
}

/// GET /api/v1/storefront/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    let data = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/storefront/categories/{id}/sections
pub async fn list_sections(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<DataResponse<Vec<Section>>>> {
    let id = parse_id("Category", &raw_id)?;
    CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    let data = SectionRepo::list_by_category(&state.pool, id).await?;
    Ok(Json(DataResponse { data }))
}

#[derive(Debug, Deserialize)]
pub struct FabricFilter {
    pub season: Option<Season>,
}

/// GET /api/v1/storefront/fabrics?season=
///
/// With a season, only fabrics for that season plus all-season ones.
pub async fn list_fabrics(
    State(state): State<AppState>,
    Query(filter): Query<FabricFilter>,
) -> AppResult<Json<DataResponse<Vec<Fabric>>>> {
    let data = match filter.season {
        Some(season) => FabricRepo::list_for_season(&state.pool, season).await?,
        None => FabricRepo::list(&state.pool).await?,
    };
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/storefront/products
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> AppResult<Json<PagedResponse<ProductCard>>> {
    let query = ProductQuery::from(params);
    let page = ProductRepo::list_paged(&state.pool, &query).await?;

    let primaries = primary_image_map(&state, &page.data).await?;
    let response = PagedResponse::from_page(page, query.page, |product| {
        card(product, &primaries, &state.cdn)
    });
    Ok(Json(response))
}

/// GET /api/v1/storefront/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ProductDetail>> {
    let id = parse_id("Product", &raw_id)?;
    Ok(Json(load_detail(&state, id).await?))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn to_cards(state: &AppState, products: Vec<Product>) -> AppResult<Vec<ProductCard>> {
    let primaries = primary_image_map(state, &products).await?;
    Ok(products
        .into_iter()
        .map(|product| card(product, &primaries, &state.cdn))
        .collect())
}

/// Map of product id to primary image public id.
async fn primary_image_map(
    state: &AppState,
    products: &[Product],
) -> AppResult<HashMap<DbId, String>> {
    if products.is_empty() {
        return Ok(HashMap::new());
    }
    let ids: Vec<DbId> = products.iter().map(|p| p.id).collect();
    let images = ProductImageRepo::list_primary_for_products(&state.pool, &ids).await?;
    Ok(images
        .into_iter()
        .map(|image| (image.product_id, image.image_url))
        .collect())
}

fn card(product: Product, primaries: &HashMap<DbId, String>, cdn: &CdnConfig) -> ProductCard {
    let image_url = primaries
        .get(&product.id)
        .map(|public_id| cdn.delivery_url(public_id, &CARD_TRANSFORM));
    ProductCard { product, image_url }
}
