//! Handlers for the `/menu` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use flamingo_core::error::CoreError;
use flamingo_core::listing::ListingProjector;
use flamingo_core::pagination::PageSize;
use flamingo_core::types::DbId;
use flamingo_db::listing::{MenuListing, MenuOrder};
use flamingo_db::models::menu_item::{
    CreateMenuItem, MenuItem, PriceInput, PublicMenuItem, UpdateMenuItem,
};
use flamingo_db::repositories::MenuItemRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::uploads::remove_stored_image;
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListingParams;
use crate::response::{DataResponse, ListingResponse};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "MenuItem",
        id,
    })
}

/// GET /api/menu/public
///
/// Visible items by category then name, all on one page unless `pageSize`
/// is given. Serves the placeholder menu when nothing is visible yet.
pub async fn list_public_menu(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> AppResult<Json<ListingResponse<PublicMenuItem>>> {
    let request = params.page_request(PageSize::Unbounded);
    let source = MenuListing::public(&state.pool);
    let listing = ListingProjector::with_fallback(MenuItem::fallback_items())
        .project(&source, request)
        .await?;

    Ok(Json(listing.map(PublicMenuItem::from).into()))
}

/// GET /api/menu?page=&pageSize=&status=&search=
pub async fn list_menu(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> AppResult<Json<ListingResponse<MenuItem>>> {
    let request = params.page_request(PageSize::Unbounded);
    let search = params.search_term();
    let source = MenuListing::new(
        &state.pool,
        params.visibility(),
        search.as_deref(),
        MenuOrder::RecentlyUpdated,
    );
    let listing = ListingProjector::new().project(&source, request).await?;

    Ok(Json(listing.into()))
}

/// POST /api/menu
pub async fn create_menu_item(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateMenuItem>,
) -> AppResult<impl IntoResponse> {
    let input = input.normalized();
    input.validate()?;
    let price = input.price.amount()?;

    let item = MenuItemRepo::create(&state.pool, &input, price).await?;

    tracing::info!(
        menu_item_id = item.id,
        name = %item.name,
        user_id = admin.user_id,
        "Menu item created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// GET /api/menu/{id}
pub async fn get_menu_item(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MenuItem>>> {
    let item = MenuItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(DataResponse { data: item }))
}

/// PATCH /api/menu/{id}
///
/// Any subset of fields; `imageUrl: null` clears the image.
pub async fn update_menu_item(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMenuItem>,
) -> AppResult<Json<DataResponse<MenuItem>>> {
    let input = input.normalized();
    input.validate()?;
    let price = input.price.as_ref().map(PriceInput::amount).transpose()?;

    let item = MenuItemRepo::update(&state.pool, id, &input, price)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(menu_item_id = id, user_id = admin.user_id, "Menu item updated");

    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/menu/{id}
pub async fn delete_menu_item(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let item = MenuItemRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(menu_item_id = id, user_id = admin.user_id, "Menu item deleted");

    remove_stored_image(state.storage.as_ref(), item.image_url.as_deref()).await;

    Ok(StatusCode::NO_CONTENT)
}
