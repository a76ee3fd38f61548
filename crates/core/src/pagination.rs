//! Page arithmetic and the pager range helper.
//!
//! Everything here is pure: requested values are clamped rather than
//! rejected, so a listing endpoint never fails because of a bad `page` or
//! `pageSize` query parameter.

use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: i64 = 50;

/// Default page size for the admin gallery table.
pub const ADMIN_GALLERY_PAGE_SIZE: i64 = 10;

/// Default page size for the public gallery page.
pub const PUBLIC_GALLERY_PAGE_SIZE: i64 = 12;

/// At or below this many pages the range helper lists every page.
const COMPACT_RANGE_THRESHOLD: i64 = 6;

// ---------------------------------------------------------------------------
// Page size / request
// ---------------------------------------------------------------------------

/// How many records a single page holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    /// At most this many records per page (already clamped to `[1, MAX_PAGE_SIZE]`).
    Limited(i64),
    /// Every matching record on a single page.
    Unbounded,
}

impl PageSize {
    /// Build a limited page size, clamping into `[1, MAX_PAGE_SIZE]`.
    pub fn limited(size: i64) -> Self {
        PageSize::Limited(size.clamp(1, MAX_PAGE_SIZE))
    }
}

/// A caller's page request after parameter parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Requested 1-based page (not yet clamped to the total page count).
    pub page: i64,
    pub page_size: PageSize,
}

impl PageRequest {
    /// Resolve raw query values against a listing-specific default size.
    ///
    /// A missing or non-positive `page` becomes 1. An explicit `page_size`
    /// always wins over the default and is clamped into `[1, MAX_PAGE_SIZE]`.
    pub fn resolve(page: Option<i64>, page_size: Option<i64>, default_size: PageSize) -> Self {
        let page = page.filter(|p| *p >= 1).unwrap_or(1);
        let page_size = match page_size {
            Some(size) => PageSize::limited(size),
            None => default_size,
        };
        Self { page, page_size }
    }

    /// First page with the given size.
    pub fn first(page_size: PageSize) -> Self {
        Self { page: 1, page_size }
    }
}

/// Parse a `page`/`pageSize` query value leniently.
///
/// Accepts integers and finite decimals (truncated toward zero). Anything
/// else, including `NaN` and infinities, yields `None` so the caller falls
/// back to its default.
///
/// ```
/// use flamingo_core::pagination::parse_page_param;
/// assert_eq!(parse_page_param(Some("3")), Some(3));
/// assert_eq!(parse_page_param(Some("2.9")), Some(2));
/// assert_eq!(parse_page_param(Some("abc")), None);
/// assert_eq!(parse_page_param(Some("inf")), None);
/// assert_eq!(parse_page_param(None), None);
/// ```
pub fn parse_page_param(raw: Option<&str>) -> Option<i64> {
    let raw = raw?.trim();
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }
    let value = raw.parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(value.trunc().clamp(i64::MIN as f64, i64::MAX as f64) as i64)
}

// ---------------------------------------------------------------------------
// Page window
// ---------------------------------------------------------------------------

/// The concrete slice of a result set selected by a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Clamped 1-based page.
    pub page: i64,
    /// Page size actually used (for unbounded requests, `max(total, 1)`).
    pub page_size: i64,
    /// Always at least 1.
    pub total_pages: i64,
    /// Number of records to skip.
    pub offset: i64,
    /// Number of records to take; `None` means all remaining.
    pub limit: Option<i64>,
}

impl PageWindow {
    /// Compute the window for `total_items` matching records.
    pub fn compute(total_items: i64, request: PageRequest) -> Self {
        let total_items = total_items.max(0);
        match request.page_size {
            PageSize::Unbounded => Self {
                page: 1,
                page_size: total_items.max(1),
                total_pages: 1,
                offset: 0,
                limit: None,
            },
            PageSize::Limited(size) => {
                let size = size.clamp(1, MAX_PAGE_SIZE);
                let total_pages = total_pages(total_items, size);
                let page = request.page.clamp(1, total_pages);
                Self {
                    page,
                    page_size: size,
                    total_pages,
                    offset: (page - 1) * size,
                    limit: Some(size),
                }
            }
        }
    }
}

/// `max(1, ceil(total_items / page_size))`.
pub fn total_pages(total_items: i64, page_size: i64) -> i64 {
    let page_size = page_size.max(1);
    let total_items = total_items.max(0);
    ((total_items + page_size - 1) / page_size).max(1)
}

// ---------------------------------------------------------------------------
// Pager range
// ---------------------------------------------------------------------------

/// One entry of a rendered pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Page(i64),
    Ellipsis,
}

impl Serialize for PageMarker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageMarker::Page(page) => serializer.serialize_i64(*page),
            PageMarker::Ellipsis => serializer.serialize_str("ellipsis"),
        }
    }
}

/// Build a condensed pager sequence with ellipsis markers.
///
/// The first and last pages are always present, as is the current page with
/// up to one neighbour on each side. Near either edge the window is pinned
/// to two pages so the pager keeps a stable width. A gap of exactly one page
/// shows that page; a wider gap collapses into a single ellipsis.
///
/// ```
/// use flamingo_core::pagination::{build_pagination_range, PageMarker::*};
/// assert_eq!(
///     build_pagination_range(1, 10),
///     vec![Page(1), Page(2), Page(3), Ellipsis, Page(10)]
/// );
/// assert_eq!(build_pagination_range(2, 4), vec![Page(1), Page(2), Page(3), Page(4)]);
/// ```
pub fn build_pagination_range(current_page: i64, total_pages: i64) -> Vec<PageMarker> {
    if total_pages <= 0 {
        return vec![PageMarker::Page(1)];
    }
    if total_pages <= COMPACT_RANGE_THRESHOLD {
        return (1..=total_pages).map(PageMarker::Page).collect();
    }

    let last = total_pages;
    let current = current_page.clamp(1, last);

    let mut left = (current - 1).clamp(2, last - 1);
    let mut right = (current + 1).clamp(2, last - 1);
    if current <= 3 {
        left = 2;
        right = right.max(3);
    }
    if current >= last - 2 {
        right = last - 1;
        left = left.min(last - 2);
    }

    let mut range = vec![PageMarker::Page(1)];

    match left - 1 {
        1 => {}
        2 => range.push(PageMarker::Page(2)),
        _ => range.push(PageMarker::Ellipsis),
    }

    range.extend((left..=right).map(PageMarker::Page));

    match last - right {
        1 => {}
        2 => range.push(PageMarker::Page(last - 1)),
        _ => range.push(PageMarker::Ellipsis),
    }

    range.push(PageMarker::Page(last));
    range
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::PageMarker::{Ellipsis, Page};
    use super::*;

    fn pages(range: &[PageMarker]) -> Vec<i64> {
        range
            .iter()
            .filter_map(|m| match m {
                Page(p) => Some(*p),
                Ellipsis => None,
            })
            .collect()
    }

    // -- total_pages / PageWindow --------------------------------------------

    #[test]
    fn total_pages_is_at_least_one() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 12), 3);
    }

    #[test]
    fn window_page_always_within_bounds() {
        for count in 0..=120 {
            for size in 1..=MAX_PAGE_SIZE {
                for requested in [-3, 0, 1, 2, 7, 1_000] {
                    let window =
                        PageWindow::compute(count, PageRequest::resolve(Some(requested), Some(size), PageSize::Unbounded));
                    let expected_pages = ((count + size - 1) / size).max(1);
                    assert_eq!(window.total_pages, expected_pages);
                    assert!(window.page >= 1 && window.page <= window.total_pages);
                    assert_eq!(window.offset, (window.page - 1) * size);
                }
            }
        }
    }

    #[test]
    fn window_clamps_past_the_end() {
        let window = PageWindow::compute(25, PageRequest::resolve(Some(5), Some(12), PageSize::Unbounded));
        assert_eq!(window.page, 3);
        assert_eq!(window.offset, 24);
        assert_eq!(window.limit, Some(12));
    }

    #[test]
    fn unbounded_window_covers_everything() {
        let window = PageWindow::compute(37, PageRequest::first(PageSize::Unbounded));
        assert_eq!(window.page, 1);
        assert_eq!(window.total_pages, 1);
        assert_eq!(window.page_size, 37);
        assert_eq!(window.limit, None);

        let empty = PageWindow::compute(0, PageRequest::first(PageSize::Unbounded));
        assert_eq!(empty.page_size, 1);
    }

    #[test]
    fn resolve_clamps_page_size_and_defaults_page() {
        let req = PageRequest::resolve(None, Some(500), PageSize::limited(10));
        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, PageSize::Limited(MAX_PAGE_SIZE));

        let req = PageRequest::resolve(Some(0), Some(0), PageSize::limited(10));
        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, PageSize::Limited(1));

        let req = PageRequest::resolve(Some(4), None, PageSize::limited(10));
        assert_eq!(req.page, 4);
        assert_eq!(req.page_size, PageSize::Limited(10));
    }

    #[test]
    fn parse_page_param_rejects_non_finite() {
        assert_eq!(parse_page_param(Some("NaN")), None);
        assert_eq!(parse_page_param(Some("-inf")), None);
        assert_eq!(parse_page_param(Some("")), None);
        assert_eq!(parse_page_param(Some(" 7 ")), Some(7));
        assert_eq!(parse_page_param(Some("-2")), Some(-2));
    }

    // -- build_pagination_range ----------------------------------------------

    #[test]
    fn small_totals_list_every_page() {
        for total in 1..=6 {
            let range = build_pagination_range(1, total);
            assert_eq!(range, (1..=total).map(Page).collect::<Vec<_>>());
        }
    }

    #[test]
    fn non_positive_total_yields_single_page() {
        assert_eq!(build_pagination_range(1, 0), vec![Page(1)]);
        assert_eq!(build_pagination_range(3, -1), vec![Page(1)]);
    }

    #[test]
    fn first_page_of_ten() {
        assert_eq!(
            build_pagination_range(1, 10),
            vec![Page(1), Page(2), Page(3), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn middle_page_has_two_ellipses() {
        assert_eq!(
            build_pagination_range(5, 10),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn last_pages_of_ten() {
        assert_eq!(
            build_pagination_range(10, 10),
            vec![Page(1), Ellipsis, Page(8), Page(9), Page(10)]
        );
        assert_eq!(
            build_pagination_range(9, 10),
            vec![Page(1), Ellipsis, Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn single_page_gap_is_filled_not_elided() {
        assert_eq!(
            build_pagination_range(4, 10),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn ranges_are_sorted_unique_and_contain_current() {
        for total in 1..=40 {
            for current in 1..=total {
                let range = build_pagination_range(current, total);
                let numbers = pages(&range);

                assert_eq!(numbers.first(), Some(&1));
                assert_eq!(numbers.last(), Some(&total));
                assert!(numbers.contains(&current), "current {current} of {total}");
                assert!(numbers.windows(2).all(|w| w[0] < w[1]), "{range:?}");

                for pair in range.windows(2) {
                    assert!(!(pair[0] == Ellipsis && pair[1] == Ellipsis));
                }
                // An ellipsis always hides at least two pages.
                for (i, marker) in range.iter().enumerate() {
                    if *marker == Ellipsis {
                        let (Page(before), Page(after)) = (range[i - 1], range[i + 1]) else {
                            panic!("ellipsis must sit between page numbers: {range:?}");
                        };
                        assert!(after - before > 2, "{range:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn markers_serialize_as_numbers_and_strings() {
        let json = serde_json::to_string(&build_pagination_range(1, 10)).unwrap();
        assert_eq!(json, r#"[1,2,3,"ellipsis",10]"#);
    }
}
