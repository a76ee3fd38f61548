//! Route definitions for `/auth`.

use axum::routing::get;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// ```text
/// GET /google            -> google_sign_in
/// GET /google/callback   -> google_callback
/// GET /session           -> get_session
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/google", get(auth::google_sign_in))
        .route("/google/callback", get(auth::google_callback))
        .route("/session", get(auth::get_session))
}
