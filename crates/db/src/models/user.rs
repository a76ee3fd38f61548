//! User and admin-allowlist models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use flamingo_core::types::{DbId, Timestamp};

/// A row from the `users` table (people who signed in through Google).
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub name: Option<String>,
    pub image: Option<String>,
    pub is_admin: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `admins` allowlist.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: DbId,
    pub email: String,
    pub name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Profile data received from the OAuth provider.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub name: Option<String>,
    pub image: Option<String>,
    pub is_admin: bool,
}

/// Lowercase and trim an email for allowlist lookups.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
