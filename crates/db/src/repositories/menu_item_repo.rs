//! Repository for the `menu_items` table.

use sqlx::PgPool;
use flamingo_core::types::DbId;

use crate::models::menu_item::{CreateMenuItem, MenuItem, UpdateMenuItem};

/// Column list for `menu_items` queries.
pub(crate) const MENU_COLUMNS: &str = "\
    id, name, description, price, category, image_url, visible, \
    created_at, updated_at";

/// Provides CRUD operations for menu items.
pub struct MenuItemRepo;

impl MenuItemRepo {
    /// Find a menu item by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MenuItem>, sqlx::Error> {
        let query = format!("SELECT {MENU_COLUMNS} FROM menu_items WHERE id = $1");
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new menu item. `price` is the already-parsed amount.
    ///
    /// Items are visible unless the DTO says otherwise.
    pub async fn create(
        pool: &PgPool,
        dto: &CreateMenuItem,
        price: f64,
    ) -> Result<MenuItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO menu_items (name, description, price, category, image_url, visible) \
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, TRUE)) \
             RETURNING {MENU_COLUMNS}"
        );
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(&dto.name)
            .bind(dto.description.as_deref())
            .bind(price)
            .bind(&dto.category)
            .bind(dto.image_url.as_deref())
            .bind(dto.visible)
            .fetch_one(pool)
            .await
    }

    /// Partially update a menu item.
    ///
    /// Uses `COALESCE` so only provided fields are changed. `image_url` uses
    /// `Option<Option<String>>` so an explicit `null` clears the image.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateMenuItem,
        price: Option<f64>,
    ) -> Result<Option<MenuItem>, sqlx::Error> {
        let image_url_provided = dto.image_url.is_some();
        let image_url_value = dto.image_url.as_ref().and_then(|v| v.as_deref());

        let query = format!(
            "UPDATE menu_items SET \
                 name        = COALESCE($2, name), \
                 description = COALESCE($3, description), \
                 price       = COALESCE($4, price), \
                 category    = COALESCE($5, category), \
                 image_url   = CASE WHEN $6 THEN $7 ELSE image_url END, \
                 visible     = COALESCE($8, visible) \
             WHERE id = $1 \
             RETURNING {MENU_COLUMNS}"
        );
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(id)
            .bind(dto.name.as_deref())
            .bind(dto.description.as_deref())
            .bind(price)
            .bind(dto.category.as_deref())
            .bind(image_url_provided)
            .bind(image_url_value)
            .bind(dto.visible)
            .fetch_optional(pool)
            .await
    }

    /// Delete a menu item, returning the removed row (for image cleanup).
    ///
    /// Returns `None` if no row matched.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<MenuItem>, sqlx::Error> {
        let query = format!("DELETE FROM menu_items WHERE id = $1 RETURNING {MENU_COLUMNS}");
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
