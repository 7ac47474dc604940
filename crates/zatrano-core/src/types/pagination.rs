//! Pagination types for list queries.
//!
//! Raw caller input arrives as [`ListParams`]; it is normalized into a
//! bounded [`PageRequest`] before any query runs, and results leave as a
//! [`PageResponse`] envelope (`{data, meta}`).

use serde::{Deserialize, Serialize};

use crate::config::PaginationConfig;
use crate::types::filter::FilterField;
use crate::types::sorting::SortDirection;

/// Default page size.
pub const DEFAULT_PER_PAGE: u64 = 25;
/// Maximum page size.
pub const MAX_PER_PAGE: u64 = 100;

/// Raw list parameters as received from the handler layer.
///
/// Nothing here is trusted: page numbers and sizes are normalized by
/// [`ListParams::page_request`], and `sort_by` is resolved against the
/// entity's sort allow-list before it can reach SQL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Requested page (1-based); values `< 1` become 1.
    #[serde(default)]
    pub page: i64,
    /// Requested page size; values `<= 0` fall back to the default.
    #[serde(default, alias = "per_page")]
    pub per_page: i64,
    /// Requested sort column (validated against an allow-list).
    #[serde(default, alias = "sort_by")]
    pub sort_by: Option<String>,
    /// Requested sort direction, `"asc"` or `"desc"`.
    #[serde(default, alias = "order_by")]
    pub order_by: Option<String>,
    /// Equality/range filters.
    #[serde(default)]
    pub filters: Vec<FilterField>,
}

impl ListParams {
    /// Create empty list parameters (first page, default size).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the requested page.
    pub fn page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    /// Set the requested page size.
    pub fn per_page(mut self, per_page: i64) -> Self {
        self.per_page = per_page;
        self
    }

    /// Set the requested sort column and direction.
    pub fn sort(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_by = Some(column.into());
        self.order_by = Some(direction.as_str().to_string());
        self
    }

    /// Add a filter condition.
    pub fn filter(mut self, filter: FilterField) -> Self {
        self.filters.push(filter);
        self
    }

    /// Normalize page and page size against the configured bounds.
    pub fn page_request(&self, bounds: &PaginationConfig) -> PageRequest {
        PageRequest::normalize(self.page, self.per_page, bounds)
    }

    /// Sort direction; anything other than `desc` sorts ascending.
    pub fn direction(&self) -> SortDirection {
        self.order_by
            .as_deref()
            .map(SortDirection::parse_lenient)
            .unwrap_or_default()
    }
}

/// A normalized, bounded page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub per_page: u64,
}

impl PageRequest {
    /// Create a page request, clamping the size to `1..=MAX_PER_PAGE`.
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Normalize raw caller values. Invalid values are replaced, never rejected.
    pub fn normalize(page: i64, per_page: i64, bounds: &PaginationConfig) -> Self {
        let max = bounds.max_per_page.max(1);
        let per_page = if per_page <= 0 {
            bounds.default_per_page.clamp(1, max)
        } else {
            (per_page as u64).min(max)
        };
        Self {
            page: page.max(1) as u64,
            per_page,
        }
    }

    /// Calculate the SQL `OFFSET` value.
    ///
    /// Capped at `i64::MAX`, the largest offset PostgreSQL accepts, so a
    /// far-out page reads as empty instead of failing.
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.per_page)
            .min(i64::MAX as u64)
    }

    /// Return the SQL `LIMIT` value.
    pub fn limit(&self) -> u64 {
        self.per_page
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Number of pages needed for `total_items`; zero when `per_page` is zero.
pub fn total_pages(total_items: u64, per_page: u64) -> u64 {
    if per_page == 0 {
        return 0;
    }
    total_items.div_ceil(per_page)
}

/// Page metadata returned alongside list results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Current page number (1-based).
    pub current_page: u64,
    /// Number of items per page.
    pub per_page: u64,
    /// Total number of matching items across all pages.
    pub total_items: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

impl PageMeta {
    /// Fold a page position and a total count into metadata.
    pub fn new(current_page: u64, per_page: u64, total_items: u64) -> Self {
        Self {
            current_page,
            per_page,
            total_items,
            total_pages: total_pages(total_items, per_page),
        }
    }

    /// Whether there is a next page.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Whether there is a previous page.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

/// Paginated response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items on this page.
    pub data: Vec<T>,
    /// Page metadata.
    pub meta: PageMeta,
}

impl<T> PageResponse<T> {
    /// Create a new paginated response.
    pub fn new(data: Vec<T>, page: &PageRequest, total_items: u64) -> Self {
        Self {
            data,
            meta: PageMeta::new(page.page, page.per_page, total_items),
        }
    }

    /// Create an empty response.
    pub fn empty(page: &PageRequest) -> Self {
        Self::new(Vec::new(), page, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(101, 25), 5);
    }

    #[test]
    fn test_total_pages_with_zero_page_size() {
        assert_eq!(total_pages(0, 0), 0);
        assert_eq!(total_pages(42, 0), 0);
    }

    #[test]
    fn test_total_pages_matches_ceiling_for_many_inputs() {
        for per_page in 1..=30u64 {
            for total in 0..=200u64 {
                let expected = (total as f64 / per_page as f64).ceil() as u64;
                assert_eq!(total_pages(total, per_page), expected, "{total}/{per_page}");
            }
        }
    }

    #[test]
    fn test_normalize_applies_defaults() {
        let bounds = PaginationConfig::default();
        let page = PageRequest::normalize(0, 0, &bounds);
        assert_eq!(page, PageRequest { page: 1, per_page: DEFAULT_PER_PAGE });

        let page = PageRequest::normalize(-4, -1, &bounds);
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, DEFAULT_PER_PAGE);
    }

    #[test]
    fn test_normalize_caps_page_size() {
        let bounds = PaginationConfig::default();
        let page = PageRequest::normalize(3, 1000, &bounds);
        assert_eq!(page.page, 3);
        assert_eq!(page.per_page, MAX_PER_PAGE);
        assert_eq!(page.offset(), 2 * MAX_PER_PAGE);
    }

    #[test]
    fn test_offset_and_limit() {
        let page = PageRequest::new(4, 20);
        assert_eq!(page.offset(), 60);
        assert_eq!(page.limit(), 20);
    }

    #[test]
    fn test_far_page_offset_fits_bigint() {
        let bounds = PaginationConfig::default();
        let page = PageRequest::normalize(i64::MAX / 2, 25, &bounds);
        assert_eq!(page.page, (i64::MAX / 2) as u64);
        assert_eq!(page.offset(), i64::MAX as u64);

        let page = PageRequest::normalize(i64::MAX, 100, &bounds);
        assert!(page.offset() <= i64::MAX as u64);
    }

    #[test]
    fn test_meta_navigation() {
        let meta = PageMeta::new(2, 10, 35);
        assert_eq!(meta.total_pages, 4);
        assert!(meta.has_next());
        assert!(meta.has_previous());

        let last = PageMeta::new(4, 10, 35);
        assert!(!last.has_next());
    }

    #[test]
    fn test_list_params_from_query_json() {
        let params: ListParams = serde_json::from_str(
            r#"{"page": 2, "perPage": 15, "sortBy": "name", "orderBy": "DESC"}"#,
        )
        .expect("deserialize");
        assert_eq!(params.page, 2);
        assert_eq!(params.per_page, 15);
        assert_eq!(params.sort_by.as_deref(), Some("name"));
        assert_eq!(params.direction(), SortDirection::Desc);
    }

    #[test]
    fn test_unknown_direction_sorts_ascending() {
        let params = ListParams {
            order_by: Some("sideways".into()),
            ..ListParams::default()
        };
        assert_eq!(params.direction(), SortDirection::Asc);
    }

    #[test]
    fn test_envelope_serializes_camel_case_meta() {
        let response = PageResponse::new(vec![1, 2], &PageRequest::new(1, 2), 5);
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json["meta"]["currentPage"], 1);
        assert_eq!(json["meta"]["perPage"], 2);
        assert_eq!(json["meta"]["totalItems"], 5);
        assert_eq!(json["meta"]["totalPages"], 3);
        assert_eq!(json["data"], serde_json::json!([1, 2]));
    }
}
