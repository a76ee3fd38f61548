//! Domain logic shared by the persistence and HTTP layers.
//!
//! Nothing in this crate performs IO directly; listings reach storage
//! through the [`listing::ListingSource`] seam.

pub mod error;
pub mod fallback;
pub mod listing;
pub mod pagination;
pub mod patch;
pub mod preferences;
pub mod reservation;
pub mod search;
pub mod storage;
pub mod types;
