//! Reservation status and input parsing.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Lifecycle status of a table reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReservationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Whether an admin may move a reservation into this status.
    ///
    /// Reservations start out pending; admins only approve or reject.
    pub fn is_decision(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(CoreError::Validation(format!(
                "Unknown reservation status '{other}'. Expected pending, approved or rejected."
            ))),
        }
    }
}

/// Parse a reservation date given as `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// Plain dates resolve to midnight UTC.
pub fn parse_reservation_date(raw: &str) -> Result<Timestamp, CoreError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| CoreError::Validation("Date is invalid".to_string()))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            ReservationStatus::Pending,
            ReservationStatus::Approved,
            ReservationStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<ReservationStatus>().unwrap(), status);
        }
        assert_matches!("cancelled".parse::<ReservationStatus>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn only_approve_and_reject_are_decisions() {
        assert!(!ReservationStatus::Pending.is_decision());
        assert!(ReservationStatus::Approved.is_decision());
        assert!(ReservationStatus::Rejected.is_decision());
    }

    #[test]
    fn parses_plain_dates_and_timestamps() {
        assert_eq!(
            parse_reservation_date("2025-06-14").unwrap(),
            Utc.with_ymd_and_hms(2025, 6, 14, 0, 0, 0).unwrap()
        );
        assert_eq!(
            parse_reservation_date("2025-06-14T19:30:00+05:30").unwrap(),
            Utc.with_ymd_and_hms(2025, 6, 14, 14, 0, 0).unwrap()
        );
        assert_matches!(parse_reservation_date("next friday"), Err(CoreError::Validation(_)));
        assert_matches!(parse_reservation_date("2025-02-30"), Err(CoreError::Validation(_)));
    }
}
