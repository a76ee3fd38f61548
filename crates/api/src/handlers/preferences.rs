//! Per-admin UI preferences.

use axum::extract::State;
use axum::Json;
use flamingo_core::preferences::{SidebarPreference, SIDEBAR_PREFERENCE_KEY};
use flamingo_db::repositories::PreferenceRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/admin/preferences/sidebar
///
/// Defaults to expanded when nothing has been saved.
pub async fn get_sidebar(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<SidebarPreference>>> {
    let stored = PreferenceRepo::get(&state.pool, admin.user_id, SIDEBAR_PREFERENCE_KEY).await?;
    let pref = SidebarPreference::from_stored(stored.map(|p| p.value));
    Ok(Json(DataResponse { data: pref }))
}

/// PUT /api/admin/preferences/sidebar
pub async fn put_sidebar(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<SidebarPreference>,
) -> AppResult<Json<DataResponse<SidebarPreference>>> {
    let saved = PreferenceRepo::upsert(
        &state.pool,
        admin.user_id,
        SIDEBAR_PREFERENCE_KEY,
        &input.to_value(),
    )
    .await?;

    tracing::info!(user_id = admin.user_id, collapsed = input.collapsed, "Sidebar preference saved");

    Ok(Json(DataResponse {
        data: SidebarPreference::from_stored(Some(saved.value)),
    }))
}
