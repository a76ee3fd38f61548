//! Route definitions for `/menu`.

use axum::routing::get;
use axum::Router;

use crate::handlers::menu;
use crate::state::AppState;

/// ```text
/// GET    /public   -> list_public_menu
/// GET    /         -> list_menu
/// POST   /         -> create_menu_item
/// GET    /{id}     -> get_menu_item
/// PATCH  /{id}     -> update_menu_item
/// DELETE /{id}     -> delete_menu_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/public", get(menu::list_public_menu))
        .route("/", get(menu::list_menu).post(menu::create_menu_item))
        .route(
            "/{id}",
            get(menu::get_menu_item)
                .patch(menu::update_menu_item)
                .delete(menu::delete_menu_item),
        )
}
