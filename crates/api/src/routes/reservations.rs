//! Route definitions for reservations.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reservations;
use crate::state::AppState;

/// Public booking routes mounted at `/reservations`.
///
/// ```text
/// POST /   -> create_reservation
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new().route("/", post(reservations::create_reservation))
}

/// Admin routes mounted at `/reservations-admin`.
///
/// ```text
/// GET   /       -> list_reservations
/// GET   /{id}   -> decide_from_link (signed email link)
/// PATCH /{id}   -> update_reservation_status
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(reservations::list_reservations))
        .route(
            "/{id}",
            get(reservations::decide_from_link).patch(reservations::update_reservation_status),
        )
}
