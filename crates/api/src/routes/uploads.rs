//! Route definitions for `/uploads`.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::uploads;
use crate::state::AppState;

/// Largest accepted upload body.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// ```text
/// POST   /   -> upload_image (multipart)
/// DELETE /   -> delete_upload
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(uploads::upload_image).delete(uploads::delete_upload),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}
