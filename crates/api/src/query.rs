//! Shared query parameter types for API handlers.

use serde::Deserialize;
use storefront_core::paging::{PageRequest, SortDirection, SortField};
use storefront_core::types::DbId;
use storefront_db::models::product::ProductQuery;

/// Query string of the paged product listing
/// (`?section_id=&category_id=&in_stock=&sort_by=&sort_dir=&page=&page_size=`).
///
/// Page values are clamped by [`PageRequest::new`].
#[derive(Debug, Default, Deserialize)]
pub struct ProductListParams {
    pub section_id: Option<DbId>,
    pub category_id: Option<DbId>,
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default)]
    pub sort_by: SortField,
    #[serde(default)]
    pub sort_dir: SortDirection,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl From<ProductListParams> for ProductQuery {
    fn from(params: ProductListParams) -> Self {
        ProductQuery {
            section_id: params.section_id,
            category_id: params.category_id,
            in_stock_only: params.in_stock,
            sort_by: params.sort_by,
            sort_dir: params.sort_dir,
            page: PageRequest::new(params.page, params.page_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_map_to_newest_first_page() {
        let query = ProductQuery::from(ProductListParams::default());
        assert_eq!(query.sort_by, SortField::CreatedAt);
        assert_eq!(query.sort_dir, SortDirection::Desc);
        assert_eq!(query.page.page(), 1);
        assert_eq!(query.page.page_size(), 12);
        assert!(!query.in_stock_only);
    }

    #[test]
    fn out_of_range_page_is_clamped() {
        let query = ProductQuery::from(ProductListParams {
            page: Some(0),
            page_size: Some(1000),
            ..Default::default()
        });
        assert_eq!(query.page.page(), 1);
        assert_eq!(query.page.page_size(), 100);
    }
}
