//! Repository for the `users` table and the `admins` allowlist.

use sqlx::PgPool;
use flamingo_core::types::DbId;

use crate::models::user::{Admin, CreateUser, User};

/// Column list for `users` queries.
const USER_COLUMNS: &str = "id, email, name, image, is_admin, created_at, updated_at";

/// Column list for `admins` queries.
const ADMIN_COLUMNS: &str = "id, email, name, created_at, updated_at";

/// Provides data access for signed-in users and the admin allowlist.
pub struct UserRepo;

impl UserRepo {
    // -----------------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------------

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new user. Fails with a `uq_users_email` violation on duplicates.
    pub async fn create(pool: &PgPool, dto: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, name, image, is_admin) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&dto.email)
            .bind(dto.name.as_deref())
            .bind(dto.image.as_deref())
            .bind(dto.is_admin)
            .fetch_one(pool)
            .await
    }

    /// Refresh the profile fields of an existing user after sign-in.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        name: Option<&str>,
        image: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET \
                 name  = COALESCE($2, name), \
                 image = COALESCE($3, image) \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(name)
            .bind(image)
            .fetch_optional(pool)
            .await
    }

    /// Flag every user with this email as admin.
    ///
    /// Returns the number of users updated.
    pub async fn grant_admin_by_email(pool: &PgPool, email: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET is_admin = TRUE WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    // -----------------------------------------------------------------------
    // Admin allowlist
    // -----------------------------------------------------------------------

    /// Whether a (normalized) email is on the admin allowlist.
    pub async fn is_allowlisted(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM admins WHERE email = $1)")
            .bind(email)
            .fetch_one(pool)
            .await
    }

    /// Add or refresh an allowlist entry.
    ///
    /// Uses `ON CONFLICT (email) DO UPDATE`; an absent name keeps the stored one.
    pub async fn upsert_admin(
        pool: &PgPool,
        email: &str,
        name: Option<&str>,
    ) -> Result<Admin, sqlx::Error> {
        let query = format!(
            "INSERT INTO admins (email, name) VALUES ($1, $2) \
             ON CONFLICT (email) DO UPDATE SET \
                 name = COALESCE(EXCLUDED.name, admins.name) \
             RETURNING {ADMIN_COLUMNS}"
        );
        sqlx::query_as::<_, Admin>(&query)
            .bind(email)
            .bind(name)
            .fetch_one(pool)
            .await
    }
}
