//! Page-based listing policy for catalog queries.
//!
//! Pages are 1-based. A page maps onto a zero-based, inclusive row range
//! `[(page - 1) * size, page * size - 1]`, which the repository layer turns
//! into `LIMIT size OFFSET (page - 1) * size`.
//!
//! Out-of-range input is clamped rather than passed through: the page is kept
//! within `1..=MAX_PAGE` and the page size within `1..=MAX_PAGE_SIZE`. A page
//! past the last row simply comes back empty.

use serde::{Deserialize, Serialize};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 12;

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Highest page number. Keeps `page * page_size` inside `i64`.
pub const MAX_PAGE: i64 = i64::MAX / MAX_PAGE_SIZE;

/// A validated, 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    page_size: i64,
}

/// Zero-based inclusive row range covered by a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowRange {
    pub from: i64,
    pub to: i64,
}

impl PageRequest {
    /// Build a page request, applying defaults and clamping.
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).clamp(1, MAX_PAGE),
            page_size: page_size
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Rows to skip before the page starts.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }

    /// Maximum number of rows on the page.
    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// The inclusive row range this page covers.
    pub fn range(&self) -> RowRange {
        let from = self.offset();
        RowRange {
            from,
            to: from + self.page_size - 1,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of rows plus the exact number of rows matching the filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: i64,
}

impl<T> Page<T> {
    /// Number of pages needed to show `total` rows at `page_size` per page.
    pub fn total_pages(&self, page_size: i64) -> i64 {
        if page_size <= 0 {
            return 0;
        }
        (self.total + page_size - 1) / page_size
    }
}

/// Whitelisted product sort columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Price,
    #[default]
    CreatedAt,
    Name,
}

impl SortField {
    /// Column name used in `ORDER BY`.
    pub fn column(self) -> &'static str {
        match self {
            SortField::Price => "price",
            SortField::CreatedAt => "created_at",
            SortField::Name => "name",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn keyword(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}
