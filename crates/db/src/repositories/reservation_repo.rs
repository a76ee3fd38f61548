//! Repository for the `reservations` table.

use sqlx::PgPool;
use flamingo_core::reservation::ReservationStatus;
use flamingo_core::types::{DbId, Timestamp};

use crate::models::reservation::{CreateReservation, Reservation};

/// Column list for `reservations` queries.
const COLUMNS: &str = "\
    id, name, phone, email, date, time, comments, status, \
    created_at, updated_at";

/// Provides data access for table reservations.
pub struct ReservationRepo;

impl ReservationRepo {
    /// Insert a new pending reservation. `date` is the already-parsed day.
    pub async fn create(
        pool: &PgPool,
        dto: &CreateReservation,
        date: Timestamp,
    ) -> Result<Reservation, sqlx::Error> {
        let query = format!(
            "INSERT INTO reservations (name, phone, email, date, time, comments, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(&dto.name)
            .bind(&dto.phone)
            .bind(&dto.email)
            .bind(date)
            .bind(&dto.time)
            .bind(dto.comments.as_deref())
            .bind(ReservationStatus::Pending.as_str())
            .fetch_one(pool)
            .await
    }

    /// List all reservations, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reservations ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Reservation>(&query).fetch_all(pool).await
    }

    /// Find a reservation by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reservations WHERE id = $1");
        sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Set a reservation's status. Returns `None` if it does not exist.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: ReservationStatus,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!(
            "UPDATE reservations SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }
}
