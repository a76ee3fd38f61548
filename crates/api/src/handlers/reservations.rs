//! Handlers for reservations: the public booking form, the admin table, and
//! the approve/reject links sent by email.
//!
//! Every email is sent once, after the database write, and its failure never
//! fails the request.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::Json;
use flamingo_core::error::CoreError;
use flamingo_core::reservation::{parse_reservation_date, ReservationStatus};
use flamingo_core::types::DbId;
use flamingo_db::models::reservation::{CreateReservation, Reservation, UpdateReservationStatus};
use flamingo_db::repositories::ReservationRepo;
use flamingo_notify::templates::{
    admin_notification, customer_status_update, decision_page, ReservationDetails,
};
use flamingo_notify::EmailContent;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{generate_action_token, validate_action_token};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query string of an emailed approve/reject link.
#[derive(Debug, Deserialize)]
pub struct ActionLinkParams {
    pub action: Option<String>,
    pub token: Option<String>,
}

/// Response of `PATCH /reservations-admin/{id}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDecisionResponse {
    pub data: Reservation,
    pub email_sent: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Reservation",
        id,
    })
}

fn details(reservation: &Reservation) -> ReservationDetails<'_> {
    ReservationDetails {
        name: &reservation.name,
        email: &reservation.email,
        phone: &reservation.phone,
        date: reservation.date,
        time: &reservation.time,
        comments: reservation.comments.as_deref(),
    }
}

fn invalid_decision() -> AppError {
    AppError::BadRequest("Invalid status. Must be 'approved' or 'rejected'".into())
}

/// Parse an admin decision; only `approved` and `rejected` are accepted.
fn parse_decision(raw: Option<&str>) -> Result<ReservationStatus, AppError> {
    raw.and_then(|s| s.parse::<ReservationStatus>().ok())
        .filter(|status| status.is_decision())
        .ok_or_else(invalid_decision)
}

/// Send one email. Returns whether it was handed to the relay.
async fn send_email(state: &AppState, to: &str, email: &EmailContent) -> bool {
    let Some(mailer) = &state.mailer else {
        tracing::debug!(to, "Mailer not configured; email skipped");
        return false;
    };
    match mailer.send(to, &email.subject, &email.html).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(to, error = %e, "Failed to send email");
            false
        }
    }
}

fn action_link(state: &AppState, id: DbId, action: ReservationStatus) -> Result<String, AppError> {
    let token = generate_action_token(id, action, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Action token generation failed: {e}")))?;
    Ok(format!(
        "{}/api/reservations-admin/{id}?action={action}&token={token}",
        state.config.public_base_url
    ))
}

async fn notify_admin(state: &AppState, reservation: &Reservation) -> Result<bool, AppError> {
    let Some(admin_email) = state.config.admin_email.as_deref() else {
        return Ok(false);
    };
    let approve = action_link(state, reservation.id, ReservationStatus::Approved)?;
    let reject = action_link(state, reservation.id, ReservationStatus::Rejected)?;
    let email = admin_notification(&details(reservation), &approve, &reject);
    Ok(send_email(state, admin_email, &email).await)
}

async fn notify_customer(state: &AppState, reservation: &Reservation, status: ReservationStatus) -> bool {
    let email = customer_status_update(&details(reservation), status);
    let sent = send_email(state, &reservation.email, &email).await;
    if !sent {
        tracing::warn!(reservation_id = reservation.id, "Reservation updated but customer email not sent");
    }
    sent
}

async fn apply_decision(
    state: &AppState,
    id: DbId,
    status: ReservationStatus,
) -> AppResult<(Reservation, bool)> {
    let reservation = ReservationRepo::update_status(&state.pool, id, status)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(reservation_id = id, status = %status, "Reservation status updated");

    let email_sent = notify_customer(state, &reservation, status).await;
    Ok((reservation, email_sent))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/reservations
///
/// Public booking form. Creates a pending reservation and emails the
/// restaurant with signed approve/reject links.
pub async fn create_reservation(
    State(state): State<AppState>,
    Json(input): Json<CreateReservation>,
) -> AppResult<impl IntoResponse> {
    let input = input.normalized();
    input.validate()?;
    let date = parse_reservation_date(&input.date)?;

    let reservation = ReservationRepo::create(&state.pool, &input, date).await?;

    tracing::info!(reservation_id = reservation.id, "Reservation created");

    match notify_admin(&state, &reservation).await {
        Ok(true) => {}
        Ok(false) => tracing::warn!(
            reservation_id = reservation.id,
            "Reservation saved but admin notification not sent",
        ),
        Err(e) => tracing::warn!(
            reservation_id = reservation.id,
            error = %e,
            "Reservation saved but admin notification failed",
        ),
    }

    Ok((StatusCode::CREATED, Json(DataResponse { data: reservation })))
}

/// GET /api/reservations-admin
pub async fn list_reservations(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Reservation>>>> {
    let reservations = ReservationRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: reservations }))
}

/// GET /api/reservations-admin/{id}?action=&token=
///
/// Target of the emailed links. The token must have been issued for this
/// reservation and this action.
pub async fn decide_from_link(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ActionLinkParams>,
) -> AppResult<Html<String>> {
    let action = parse_decision(params.action.as_deref())?;
    let token = params.token.as_deref().unwrap_or_default();
    validate_action_token(token, id, action, &state.config.jwt).map_err(|_| {
        AppError::Core(CoreError::Unauthorized("Invalid or expired link".into()))
    })?;

    tracing::info!(reservation_id = id, action = %action, "Reservation email link followed");

    let (reservation, email_sent) = apply_decision(&state, id, action).await?;
    Ok(Html(decision_page(reservation.id, action, email_sent)))
}

/// PATCH /api/reservations-admin/{id}
pub async fn update_reservation_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateReservationStatus>,
) -> AppResult<Json<ReservationDecisionResponse>> {
    let status = input.status;
    if !status.is_decision() {
        return Err(invalid_decision());
    }

    let (reservation, email_sent) = apply_decision(&state, id, status).await?;
    tracing::debug!(reservation_id = id, user_id = admin.user_id, email_sent, "Dashboard decision");

    Ok(Json(ReservationDecisionResponse {
        data: reservation,
        email_sent,
    }))
}
