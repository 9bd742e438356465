//! JSON envelopes for list responses.

use serde::Serialize;
use storefront_core::paging::{Page, PageRequest};

/// `{"data": ...}` wrapper for unpaged lists.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// One page of a listing plus the numbers a pager needs.
#[derive(Debug, Serialize)]
pub struct PagedResponse<T: Serialize> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl<T: Serialize> PagedResponse<T> {
    /// Build the envelope from a repository page, mapping each row.
    pub fn from_page<R>(page: Page<R>, request: PageRequest, map: impl FnMut(R) -> T) -> Self {
        let total_pages = page.total_pages(request.page_size());
        Self {
            data: page.data.into_iter().map(map).collect(),
            total: page.total,
            page: request.page(),
            page_size: request.page_size(),
            total_pages,
        }
    }
}
