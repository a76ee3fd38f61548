//! Listing projection: paging, category aggregation and fallback datasets.
//!
//! A [`ListingSource`] knows how to count, page and aggregate one filtered,
//! ordered record set (the filter and order are baked into the source). The
//! [`ListingProjector`] drives a source through the three reads a listing
//! needs and assembles a [`Listing`] with its [`ListingMeta`].
//!
//! When the source is empty and the projector was given a fallback dataset,
//! the same projection runs over a [`StaticSource`] instead, so callers never
//! branch on which path produced the page.

use std::collections::BTreeMap;
use std::convert::Infallible;

use async_trait::async_trait;
use serde::Serialize;

use crate::pagination::{build_pagination_range, PageMarker, PageRequest, PageWindow};
use crate::types::Timestamp;

/// Bucket used for records whose category label is empty or whitespace.
pub const UNCATEGORISED: &str = "Uncategorised";

// ---------------------------------------------------------------------------
// Records and sources
// ---------------------------------------------------------------------------

/// A record that can appear in a listing.
pub trait ListingRecord {
    /// Raw category label as stored.
    fn category(&self) -> &str;
    /// Creation time, if the record was persisted.
    fn created_at(&self) -> Option<Timestamp>;
}

/// Per-label tally returned by a grouping aggregation or built from a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTally {
    /// Raw label (not yet normalized).
    pub label: String,
    pub count: i64,
    /// Latest creation time within the bucket.
    pub latest_created_at: Option<Timestamp>,
}

/// One scanned record reduced to the fields category aggregation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySample {
    pub label: String,
    pub created_at: Option<Timestamp>,
}

/// A filtered, ordered record set that a listing is projected from.
#[async_trait]
pub trait ListingSource: Send + Sync {
    type Item: Send;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Number of records matching the source's filter.
    async fn count(&self) -> Result<i64, Self::Error>;

    /// Records in listing order, skipping `offset` and taking `limit` (all when `None`).
    async fn fetch_page(&self, offset: i64, limit: Option<i64>)
        -> Result<Vec<Self::Item>, Self::Error>;

    /// Whether [`group_categories`](Self::group_categories) is available at all.
    fn supports_grouping(&self) -> bool {
        true
    }

    /// Native grouping aggregation over the full matching set.
    async fn group_categories(&self) -> Result<Vec<CategoryTally>, Self::Error>;

    /// Category and creation time of every matching record.
    async fn scan_categories(&self) -> Result<Vec<CategorySample>, Self::Error>;
}

// ---------------------------------------------------------------------------
// Category aggregation
// ---------------------------------------------------------------------------

/// Which aggregation strategy produced a [`CategorySummary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationStrategy {
    Grouped,
    Scanned,
}

/// Normalized category counts over a full matching set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub counts: BTreeMap<String, i64>,
    pub latest_created_at: Option<Timestamp>,
    pub strategy: AggregationStrategy,
}

impl CategorySummary {
    fn from_tallies(tallies: Vec<CategoryTally>, strategy: AggregationStrategy) -> Self {
        let mut counts = BTreeMap::new();
        let mut latest_created_at = None;
        for tally in tallies {
            *counts.entry(normalize_category(&tally.label)).or_insert(0) += tally.count;
            latest_created_at = latest_created_at.max(tally.latest_created_at);
        }
        Self {
            counts,
            latest_created_at,
            strategy,
        }
    }

    /// Sum of all bucket counts.
    pub fn total(&self) -> i64 {
        self.counts.values().sum()
    }
}

/// Trim a label and map empty labels to [`UNCATEGORISED`].
///
/// ```
/// use flamingo_core::listing::normalize_category;
/// assert_eq!(normalize_category("  Food "), "Food");
/// assert_eq!(normalize_category("   "), "Uncategorised");
/// ```
pub fn normalize_category(label: &str) -> String {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        UNCATEGORISED.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Tally scanned samples into per-label buckets.
pub fn tally_samples(samples: Vec<CategorySample>) -> Vec<CategoryTally> {
    let mut buckets: BTreeMap<String, CategoryTally> = BTreeMap::new();
    for sample in samples {
        let bucket = buckets
            .entry(sample.label.clone())
            .or_insert_with(|| CategoryTally {
                label: sample.label,
                count: 0,
                latest_created_at: None,
            });
        bucket.count += 1;
        bucket.latest_created_at = bucket.latest_created_at.max(sample.created_at);
    }
    buckets.into_values().collect()
}

/// Aggregate category counts, preferring native grouping.
///
/// Falls back to a full scan when the source cannot group or the grouping
/// query fails. A grouping failure is logged and swallowed; a scan failure
/// is returned.
pub async fn aggregate_category_counts<S>(source: &S) -> Result<CategorySummary, S::Error>
where
    S: ListingSource + ?Sized,
{
    if source.supports_grouping() {
        match source.group_categories().await {
            Ok(tallies) => {
                return Ok(CategorySummary::from_tallies(
                    tallies,
                    AggregationStrategy::Grouped,
                ))
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "Category grouping failed, falling back to scan",
                );
            }
        }
    }

    let samples = source.scan_categories().await?;
    Ok(CategorySummary::from_tallies(
        tally_samples(samples),
        AggregationStrategy::Scanned,
    ))
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Which records a listing includes by visibility flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityFilter {
    #[default]
    All,
    Visible,
    Hidden,
}

impl VisibilityFilter {
    /// Parse a `status` query value. Unknown or missing values mean `All`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("visible") => Self::Visible,
            Some("hidden") => Self::Hidden,
            _ => Self::All,
        }
    }

    /// The required value of the visibility flag, if any.
    pub fn required_flag(self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Visible => Some(true),
            Self::Hidden => Some(false),
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Summary metadata attached to every listing response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingMeta {
    pub page: i64,
    pub page_size: i64,
    pub total_items: i64,
    pub total_pages: i64,
    pub total_categories: i64,
    pub category_counts: BTreeMap<String, i64>,
    pub latest_created_at: Option<Timestamp>,
    pub page_range: Vec<PageMarker>,
    pub is_fallback: bool,
}

/// A page of records plus its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub meta: ListingMeta,
}

impl<T> Listing<T> {
    /// Convert every item, keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Listing<U> {
        Listing {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

// ---------------------------------------------------------------------------
// Static source (fallback datasets)
// ---------------------------------------------------------------------------

/// An in-memory [`ListingSource`] over a fixed, already-ordered record set.
#[derive(Debug, Clone)]
pub struct StaticSource<T> {
    items: Vec<T>,
}

impl<T> StaticSource<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl<T> ListingSource for StaticSource<T>
where
    T: ListingRecord + Clone + Send + Sync,
{
    type Item = T;
    type Error = Infallible;

    async fn count(&self) -> Result<i64, Infallible> {
        Ok(self.items.len() as i64)
    }

    async fn fetch_page(&self, offset: i64, limit: Option<i64>) -> Result<Vec<T>, Infallible> {
        let skip = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let take = limit
            .map(|l| usize::try_from(l.max(0)).unwrap_or(usize::MAX))
            .unwrap_or(usize::MAX);
        Ok(self.items.iter().skip(skip).take(take).cloned().collect())
    }

    fn supports_grouping(&self) -> bool {
        false
    }

    async fn group_categories(&self) -> Result<Vec<CategoryTally>, Infallible> {
        Ok(Vec::new())
    }

    async fn scan_categories(&self) -> Result<Vec<CategorySample>, Infallible> {
        Ok(self
            .items
            .iter()
            .map(|item| CategorySample {
                label: item.category().to_string(),
                created_at: item.created_at(),
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Projector
// ---------------------------------------------------------------------------

/// Projects a [`ListingSource`] into a [`Listing`], optionally substituting a
/// fallback dataset when the source is empty.
#[derive(Debug, Clone)]
pub struct ListingProjector<T> {
    fallback: Option<StaticSource<T>>,
}

impl<T> Default for ListingProjector<T> {
    fn default() -> Self {
        Self { fallback: None }
    }
}

impl<T> ListingProjector<T>
where
    T: ListingRecord + Clone + Send + Sync,
{
    /// A projector that returns empty pages for empty sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// A projector that serves `items` whenever the source is empty.
    pub fn with_fallback(items: Vec<T>) -> Self {
        Self {
            fallback: Some(StaticSource::new(items)),
        }
    }

    /// Project one page of `source`.
    pub async fn project<S>(&self, source: &S, request: PageRequest) -> Result<Listing<T>, S::Error>
    where
        S: ListingSource<Item = T> + ?Sized,
    {
        let total_items = source.count().await?;

        if total_items == 0 {
            if let Some(fallback) = self.fallback.as_ref().filter(|f| !f.items.is_empty()) {
                let listing = match project_counted(fallback, request, fallback.items.len() as i64).await {
                    Ok(listing) => listing,
                    Err(never) => match never {},
                };
                tracing::debug!(
                    page = listing.meta.page,
                    items = listing.items.len(),
                    "Serving fallback listing",
                );
                return Ok(Listing {
                    items: listing.items,
                    meta: ListingMeta {
                        latest_created_at: None,
                        is_fallback: true,
                        ..listing.meta
                    },
                });
            }
        }

        project_counted(source, request, total_items).await
    }
}

/// Project a source whose matching count is already known.
async fn project_counted<S>(
    source: &S,
    request: PageRequest,
    total_items: i64,
) -> Result<Listing<S::Item>, S::Error>
where
    S: ListingSource + ?Sized,
{
    let window = PageWindow::compute(total_items, request);
    let page_range = build_pagination_range(window.page, window.total_pages);

    if total_items == 0 {
        return Ok(Listing {
            items: Vec::new(),
            meta: ListingMeta {
                page: window.page,
                page_size: window.page_size,
                total_items: 0,
                total_pages: window.total_pages,
                total_categories: 0,
                category_counts: BTreeMap::new(),
                latest_created_at: None,
                page_range,
                is_fallback: false,
            },
        });
    }

    let (items, summary) = tokio::join!(
        source.fetch_page(window.offset, window.limit),
        aggregate_category_counts(source),
    );
    let items = items?;
    let summary = summary?;

    Ok(Listing {
        items,
        meta: ListingMeta {
            page: window.page,
            page_size: window.page_size,
            total_items,
            total_pages: window.total_pages,
            total_categories: summary.counts.len() as i64,
            category_counts: summary.counts,
            latest_created_at: summary.latest_created_at,
            page_range,
            is_fallback: false,
        },
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
