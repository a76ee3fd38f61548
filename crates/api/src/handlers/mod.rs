//! HTTP handlers, one module per resource.

pub mod auth;
pub mod contact;
pub mod gallery;
pub mod menu;
pub mod preferences;
pub mod reservations;
pub mod uploads;
