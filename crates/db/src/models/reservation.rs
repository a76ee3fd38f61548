//! Reservation models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use flamingo_core::patch::blank_to_none;
use flamingo_core::reservation::{parse_reservation_date, ReservationStatus};
use flamingo_core::types::{DbId, Timestamp};

/// A row from the `reservations` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: DbId,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub date: Timestamp,
    pub time: String,
    pub comments: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Reservation {
    /// Parsed status; rows are constrained to the known values.
    pub fn status(&self) -> Option<ReservationStatus> {
        self.status.parse().ok()
    }
}

/// DTO for a public reservation request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReservation {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    #[validate(custom(function = "validate_date"))]
    pub date: String,
    #[validate(length(min = 1, message = "Time is required"))]
    pub time: String,
    pub comments: Option<String>,
}

impl CreateReservation {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            date: self.date.trim().to_string(),
            time: self.time.trim().to_string(),
            comments: blank_to_none(self.comments),
        }
    }
}

fn validate_date(date: &str) -> Result<(), ValidationError> {
    parse_reservation_date(date)
        .map(|_| ())
        .map_err(|_| ValidationError::new("date").with_message("Date is invalid".into()))
}

/// DTO for an admin status decision.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateReservationStatus {
    pub status: ReservationStatus,
}
