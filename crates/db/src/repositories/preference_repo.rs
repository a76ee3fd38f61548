//! Repository for the `admin_preferences` key/value table.

use sqlx::PgPool;
use flamingo_core::types::DbId;

use crate::models::preference::AdminPreference;

/// Column list for `admin_preferences` queries.
const COLUMNS: &str = "id, user_id, key, value, created_at, updated_at";

/// Provides data access for per-admin UI preferences.
pub struct PreferenceRepo;

impl PreferenceRepo {
    /// Get one preference for a user. Returns `None` if never saved.
    pub async fn get(
        pool: &PgPool,
        user_id: DbId,
        key: &str,
    ) -> Result<Option<AdminPreference>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admin_preferences WHERE user_id = $1 AND key = $2");
        sqlx::query_as::<_, AdminPreference>(&query)
            .bind(user_id)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace one preference for a user.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        key: &str,
        value: &serde_json::Value,
    ) -> Result<AdminPreference, sqlx::Error> {
        let query = format!(
            "INSERT INTO admin_preferences (user_id, key, value) VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, key) DO UPDATE SET value = EXCLUDED.value \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminPreference>(&query)
            .bind(user_id)
            .bind(key)
            .bind(value)
            .fetch_one(pool)
            .await
    }
}
