//! Repository for the `gallery_items` table.

use sqlx::PgPool;
use flamingo_core::types::DbId;

use crate::models::gallery_item::{CreateGalleryItem, GalleryItem, UpdateGalleryItem};

/// Column list for `gallery_items` queries.
pub(crate) const GALLERY_COLUMNS: &str = "\
    id, category, caption, image_url, visible, created_at, updated_at";

/// Provides CRUD operations for gallery items.
pub struct GalleryItemRepo;

impl GalleryItemRepo {
    /// Find a gallery item by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GalleryItem>, sqlx::Error> {
        let query = format!("SELECT {GALLERY_COLUMNS} FROM gallery_items WHERE id = $1");
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new gallery item (visible by default).
    pub async fn create(pool: &PgPool, dto: &CreateGalleryItem) -> Result<GalleryItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO gallery_items (category, caption, image_url, visible) \
             VALUES ($1, $2, $3, COALESCE($4, TRUE)) \
             RETURNING {GALLERY_COLUMNS}"
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(&dto.category)
            .bind(dto.caption.as_deref())
            .bind(&dto.image_url)
            .bind(dto.visible)
            .fetch_one(pool)
            .await
    }

    /// Partially update a gallery item.
    ///
    /// `caption` uses `Option<Option<String>>` so it can be cleared.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateGalleryItem,
    ) -> Result<Option<GalleryItem>, sqlx::Error> {
        let caption_provided = dto.caption.is_some();
        let caption_value = dto.caption.as_ref().and_then(|v| v.as_deref());

        let query = format!(
            "UPDATE gallery_items SET \
                 category  = COALESCE($2, category), \
                 caption   = CASE WHEN $3 THEN $4 ELSE caption END, \
                 image_url = COALESCE($5, image_url), \
                 visible   = COALESCE($6, visible) \
             WHERE id = $1 \
             RETURNING {GALLERY_COLUMNS}"
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(id)
            .bind(dto.category.as_deref())
            .bind(caption_provided)
            .bind(caption_value)
            .bind(dto.image_url.as_deref())
            .bind(dto.visible)
            .fetch_optional(pool)
            .await
    }

    /// Delete a gallery item, returning the removed row (for image cleanup).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<GalleryItem>, sqlx::Error> {
        let query = format!("DELETE FROM gallery_items WHERE id = $1 RETURNING {GALLERY_COLUMNS}");
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
