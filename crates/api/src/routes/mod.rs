pub mod auth;
pub mod contact;
pub mod gallery;
pub mod health;
pub mod menu;
pub mod preferences;
pub mod reservations;
pub mod uploads;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/google                          redirect to Google (public)
/// /auth/google/callback                 OAuth callback (public)
/// /auth/session                         current session (auth required)
///
/// /gallery/public                       public gallery listing
/// /gallery                              list, create (admin)
/// /gallery/{id}                         get, update, delete (admin)
///
/// /menu/public                          public menu listing
/// /menu                                 list, create (admin)
/// /menu/{id}                            get, update, delete (admin)
///
/// /uploads                              upload, delete image (admin)
///
/// /reservations                         create (public)
/// /reservations-admin                   list (admin)
/// /reservations-admin/{id}              email link (GET, signed token), decide (PATCH, admin)
///
/// /contact                              create (public), list (admin)
/// /contact/{id}                         get, mark read, delete (admin)
///
/// /admin/preferences/sidebar            get, put (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/gallery", gallery::router())
        .nest("/menu", menu::router())
        .nest("/uploads", uploads::router())
        .nest("/reservations", reservations::public_router())
        .nest("/reservations-admin", reservations::admin_router())
        .nest("/contact", contact::router())
        .nest("/admin/preferences", preferences::router())
}
