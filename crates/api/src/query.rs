//! Shared query parameter types for API handlers.

use flamingo_core::listing::VisibilityFilter;
use flamingo_core::pagination::{parse_page_param, PageRequest, PageSize};
use flamingo_core::search::normalize_search_term;
use serde::Deserialize;

/// Listing parameters (`?page=&pageSize=&status=&search=`).
///
/// Values arrive as raw strings so malformed numbers fall back to defaults
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

impl ListingParams {
    /// Resolve `page` and `pageSize` against a listing-specific default size.
    pub fn page_request(&self, default_size: PageSize) -> PageRequest {
        PageRequest::resolve(
            parse_page_param(self.page.as_deref()),
            parse_page_param(self.page_size.as_deref()),
            default_size,
        )
    }

    pub fn visibility(&self) -> VisibilityFilter {
        VisibilityFilter::parse(self.status.as_deref())
    }

    /// Trimmed search term, or `None` when blank.
    pub fn search_term(&self) -> Option<String> {
        normalize_search_term(self.search.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_numbers_use_defaults() {
        let params = ListingParams {
            page: Some("abc".into()),
            page_size: Some("500".into()),
            ..Default::default()
        };
        let request = params.page_request(PageSize::Limited(10));
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, PageSize::Limited(50));
    }

    #[test]
    fn blank_search_is_ignored() {
        let params = ListingParams {
            search: Some("   ".into()),
            status: Some("hidden".into()),
            ..Default::default()
        };
        assert_eq!(params.search_term(), None);
        assert_eq!(params.visibility(), VisibilityFilter::Hidden);
    }
}
