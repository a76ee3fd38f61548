//! Per-admin key/value UI preferences.

use serde::Serialize;
use sqlx::FromRow;

use flamingo_core::types::{DbId, Timestamp};

/// A row from the `admin_preferences` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminPreference {
    pub id: DbId,
    pub user_id: DbId,
    pub key: String,
    pub value: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
