//! Repository for the `messages` table (contact form submissions).

use sqlx::PgPool;
use flamingo_core::types::DbId;

use crate::models::message::{CreateMessage, Message};

/// Column list for `messages` queries.
const COLUMNS: &str = "id, name, email, subject, message, read, created_at, updated_at";

/// Provides CRUD operations for contact messages.
pub struct MessageRepo;

impl MessageRepo {
    /// Store a new (unread) message.
    pub async fn create(pool: &PgPool, dto: &CreateMessage) -> Result<Message, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages (name, email, subject, message) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(&dto.name)
            .bind(&dto.email)
            .bind(&dto.subject)
            .bind(&dto.message)
            .fetch_one(pool)
            .await
    }

    /// List all messages, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM messages ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Message>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Message>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM messages WHERE id = $1");
        sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Mark a message read or unread.
    pub async fn set_read(
        pool: &PgPool,
        id: DbId,
        read: bool,
    ) -> Result<Option<Message>, sqlx::Error> {
        let query = format!("UPDATE messages SET read = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .bind(read)
            .fetch_optional(pool)
            .await
    }

    /// Delete a message by ID.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
