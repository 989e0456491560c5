/// Shared pagination over ordered query results
///
/// Every list endpoint returns a `Page<T>`: the requested slice plus the
/// page math computed from a precomputed total count. The engine never
/// fetches rows itself; callers supply an already-sorted, offset-and-limited
/// slice.
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single page of an ordered result set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
    pub total: i64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(page: i64, per_page: i64, total: i64, items: Vec<T>) -> Self {
        Self {
            page,
            per_page,
            total_pages: total_pages(total, per_page),
            total,
            items,
        }
    }
}

/// `ceil(total / per_page)`; zero when the set is empty
pub fn total_pages(total: i64, per_page: i64) -> i64 {
    (total + per_page - 1) / per_page
}

/// Row offset for a 1-based page number
pub fn offset(page: i64, per_page: i64) -> i64 {
    (page - 1) * per_page
}

/// Query parameters shared by all list endpoints
#[derive(Debug, Deserialize, Validate)]
pub struct PageQuery {
    /// Page number starting from 1
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: i64,
    /// Number of items per page
    #[serde(default = "default_per_page")]
    #[validate(range(min = 1, max = 100))]
    pub per_page: i64,
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_ceiling() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(100, 7), 15);
        assert_eq!(total_pages(1, 1), 1);
        assert_eq!(total_pages(99, 100), 1);
    }

    #[test]
    fn test_offset() {
        assert_eq!(offset(1, 10), 0);
        assert_eq!(offset(2, 10), 10);
        assert_eq!(offset(5, 25), 100);
    }

    #[test]
    fn test_page_new() {
        let page = Page::new(2, 10, 25, vec![1, 2, 3]);
        assert_eq!(page.page, 2);
        assert_eq!(page.per_page, 10);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total, 25);
        assert_eq!(page.items.len(), 3);
    }

    #[test]
    fn test_page_query_defaults() {
        let query: PageQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, 10);
    }

    #[test]
    fn test_page_query_bounds() {
        let query = PageQuery {
            page: 0,
            per_page: 10,
        };
        assert!(query.validate().is_err());

        let query = PageQuery {
            page: 1,
            per_page: 101,
        };
        assert!(query.validate().is_err());

        let query = PageQuery {
            page: 1,
            per_page: 100,
        };
        assert!(query.validate().is_ok());
    }
}
