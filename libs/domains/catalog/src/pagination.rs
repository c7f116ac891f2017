//! Page/limit parsing and page metadata.

use serde::Serialize;
use utoipa::ToSchema;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 50;

/// A 1-based page of `limit` records. Both values are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Values below 1 are raised to 1.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Parse raw query values. Missing, non-numeric or non-positive input
    /// falls back to the default instead of failing.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: positive_or(page, DEFAULT_PAGE),
            limit: positive_or(limit, DEFAULT_LIMIT),
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Records to skip before this page.
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Metadata for this page given the number of matching records.
    pub fn meta(&self, total_count: u64) -> PageMeta {
        PageMeta {
            current_page: self.page,
            total_pages: total_count.div_ceil(self.limit),
            total_count,
            limit: self.limit,
        }
    }
}

fn positive_or(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value >= 1)
        .unwrap_or(default)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub current_page: u64,
    /// `ceil(totalCount / limit)`; 0 when nothing matches
    pub total_pages: u64,
    pub total_count: u64,
    pub limit: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page = PageRequest::parse(None, None);
        assert_eq!(page, PageRequest::default());
        assert_eq!(page.page(), 1);
        assert_eq!(page.limit(), 50);
        assert_eq!(page.skip(), 0);
    }

    #[test]
    fn test_second_page_of_twenty_five() {
        let page = PageRequest::parse(Some("2"), Some("10"));
        assert_eq!(page.skip(), 10);
        assert_eq!(
            page.meta(25),
            PageMeta {
                current_page: 2,
                total_pages: 3,
                total_count: 25,
                limit: 10,
            }
        );
    }

    #[test]
    fn test_empty_result_has_zero_pages() {
        let meta = PageRequest::default().meta(0);
        assert_eq!(meta.total_pages, 0);
        assert_eq!(meta.total_count, 0);
    }

    #[test]
    fn test_invalid_input_falls_back() {
        for raw in ["abc", "0", "-3", "", "1.5"] {
            let page = PageRequest::parse(Some(raw), Some(raw));
            assert_eq!(page, PageRequest::default(), "input {raw:?}");
        }
        assert_eq!(PageRequest::parse(Some(" 3 "), None).page(), 3);
    }

    #[test]
    fn test_page_past_end_is_not_an_error() {
        let page = PageRequest::new(9, 10);
        assert_eq!(page.skip(), 80);
        assert_eq!(page.meta(25).total_pages, 3);
    }

    #[test]
    fn test_new_clamps_to_one() {
        let page = PageRequest::new(0, 0);
        assert_eq!((page.page(), page.limit()), (1, 1));
    }

    #[test]
    fn test_skip_saturates() {
        assert_eq!(PageRequest::new(u64::MAX, u64::MAX).skip(), u64::MAX);
    }
}
