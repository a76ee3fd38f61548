//! Route definitions for `/admin/preferences`.

use axum::routing::get;
use axum::Router;

use crate::handlers::preferences;
use crate::state::AppState;

/// ```text
/// GET /sidebar   -> get_sidebar
/// PUT /sidebar   -> put_sidebar
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/sidebar",
        get(preferences::get_sidebar).put(preferences::put_sidebar),
    )
}
