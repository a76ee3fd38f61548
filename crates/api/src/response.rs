//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Listings add a
//! `meta` block with pagination and category metadata.

use flamingo_core::listing::{Listing, ListingMeta};
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": [T], "meta": ListingMeta }` envelope for projected listings.
#[derive(Debug, Serialize)]
pub struct ListingResponse<T: Serialize> {
    pub data: Vec<T>,
    pub meta: ListingMeta,
}

impl<T: Serialize> From<Listing<T>> for ListingResponse<T> {
    fn from(listing: Listing<T>) -> Self {
        Self {
            data: listing.items,
            meta: listing.meta,
        }
    }
}
