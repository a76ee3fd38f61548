//! Handlers for the `/gallery` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use flamingo_core::error::CoreError;
use flamingo_core::listing::{ListingProjector, VisibilityFilter};
use flamingo_core::pagination::{PageSize, ADMIN_GALLERY_PAGE_SIZE, PUBLIC_GALLERY_PAGE_SIZE};
use flamingo_core::types::DbId;
use flamingo_db::listing::GalleryListing;
use flamingo_db::models::gallery_item::{
    CreateGalleryItem, GalleryItem, PublicGalleryItem, UpdateGalleryItem,
};
use flamingo_db::repositories::GalleryItemRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::uploads::remove_stored_image;
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListingParams;
use crate::response::{DataResponse, ListingResponse};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "GalleryItem",
        id,
    })
}

/// GET /api/gallery/public
///
/// Visible items, newest first. Serves the placeholder gallery when nothing
/// is visible yet.
pub async fn list_public_gallery(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> AppResult<Json<ListingResponse<PublicGalleryItem>>> {
    let request = params.page_request(PageSize::limited(PUBLIC_GALLERY_PAGE_SIZE));
    let source = GalleryListing::public(&state.pool);
    let listing = ListingProjector::with_fallback(GalleryItem::fallback_items())
        .project(&source, request)
        .await?;

    Ok(Json(listing.map(PublicGalleryItem::from).into()))
}

/// GET /api/gallery
pub async fn list_gallery(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> AppResult<Json<ListingResponse<GalleryItem>>> {
    let request = params.page_request(PageSize::limited(ADMIN_GALLERY_PAGE_SIZE));
    let source = GalleryListing::new(&state.pool, VisibilityFilter::All);
    let listing = ListingProjector::new().project(&source, request).await?;

    Ok(Json(listing.into()))
}

/// POST /api/gallery
pub async fn create_gallery_item(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateGalleryItem>,
) -> AppResult<impl IntoResponse> {
    let input = input.normalized();
    input.validate()?;

    let item = GalleryItemRepo::create(&state.pool, &input).await?;

    tracing::info!(
        gallery_item_id = item.id,
        category = %item.category,
        user_id = admin.user_id,
        "Gallery item created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// GET /api/gallery/{id}
pub async fn get_gallery_item(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<GalleryItem>>> {
    let item = GalleryItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(DataResponse { data: item }))
}

/// PATCH /api/gallery/{id}
///
/// `caption: null` or `""` clears the caption; absent fields are kept.
pub async fn update_gallery_item(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGalleryItem>,
) -> AppResult<Json<DataResponse<GalleryItem>>> {
    let input = input.normalized();
    input.validate()?;

    let item = GalleryItemRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(gallery_item_id = id, user_id = admin.user_id, "Gallery item updated");

    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/gallery/{id}
///
/// Removes the row, then the stored image if it lives in our bucket.
pub async fn delete_gallery_item(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let item = GalleryItemRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(gallery_item_id = id, user_id = admin.user_id, "Gallery item deleted");

    remove_stored_image(state.storage.as_ref(), Some(&item.image_url)).await;

    Ok(StatusCode::NO_CONTENT)
}
