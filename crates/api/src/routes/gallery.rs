//! Route definitions for `/gallery`.

use axum::routing::get;
use axum::Router;

use crate::handlers::gallery;
use crate::state::AppState;

/// ```text
/// GET    /public   -> list_public_gallery
/// GET    /         -> list_gallery
/// POST   /         -> create_gallery_item
/// GET    /{id}     -> get_gallery_item
/// PATCH  /{id}     -> update_gallery_item
/// DELETE /{id}     -> delete_gallery_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/public", get(gallery::list_public_gallery))
        .route(
            "/",
            get(gallery::list_gallery).post(gallery::create_gallery_item),
        )
        .route(
            "/{id}",
            get(gallery::get_gallery_item)
                .patch(gallery::update_gallery_item)
                .delete(gallery::delete_gallery_item),
        )
}
