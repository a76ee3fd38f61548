//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the signed-in user from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires an admin session.

pub mod auth;
pub mod rbac;
