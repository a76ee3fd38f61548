//! Route definitions for `/contact`.

use axum::routing::get;
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

/// ```text
/// POST   /       -> create_message (public)
/// GET    /       -> list_messages
/// GET    /{id}   -> get_message
/// PATCH  /{id}   -> update_message
/// DELETE /{id}   -> delete_message
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(contact::list_messages).post(contact::create_message))
        .route(
            "/{id}",
            get(contact::get_message)
                .patch(contact::update_message)
                .delete(contact::delete_message),
        )
}
