//! Authentication primitives.
//!
//! - [`jwt`] -- session, OAuth state and reservation action tokens.
//! - [`google`] -- Google OAuth 2.0 sign-in.

pub mod google;
pub mod jwt;
