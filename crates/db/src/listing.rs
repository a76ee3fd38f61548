//! SQL-backed [`ListingSource`] implementations for the gallery and menu.
//!
//! Each source carries its filter and order, so the count, page, grouping
//! and scan queries all see the same matching set.

use async_trait::async_trait;
use sqlx::PgPool;

use flamingo_core::listing::{CategorySample, CategoryTally, ListingSource, VisibilityFilter};
use flamingo_core::search::contains_pattern;
use flamingo_core::types::Timestamp;

use crate::models::gallery_item::GalleryItem;
use crate::models::menu_item::MenuItem;
use crate::repositories::gallery_item_repo::GALLERY_COLUMNS;
use crate::repositories::menu_item_repo::MENU_COLUMNS;

fn visibility_condition(filter: VisibilityFilter) -> Option<&'static str> {
    match filter.required_flag() {
        Some(true) => Some("visible = TRUE"),
        Some(false) => Some("visible = FALSE"),
        None => None,
    }
}

fn where_clause(conditions: &[String]) -> String {
    if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    }
}

fn tally_rows(rows: Vec<(String, i64, Option<Timestamp>)>) -> Vec<CategoryTally> {
    rows.into_iter()
        .map(|(label, count, latest_created_at)| CategoryTally {
            label,
            count,
            latest_created_at,
        })
        .collect()
}

fn sample_rows(rows: Vec<(String, Timestamp)>) -> Vec<CategorySample> {
    rows.into_iter()
        .map(|(label, created_at)| CategorySample {
            label,
            created_at: Some(created_at),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

/// Gallery items, newest first.
pub struct GalleryListing<'a> {
    pool: &'a PgPool,
    where_sql: String,
}

impl<'a> GalleryListing<'a> {
    pub fn new(pool: &'a PgPool, visibility: VisibilityFilter) -> Self {
        let conditions: Vec<String> = visibility_condition(visibility)
            .into_iter()
            .map(str::to_string)
            .collect();
        Self {
            pool,
            where_sql: where_clause(&conditions),
        }
    }

    /// Only items visitors may see.
    pub fn public(pool: &'a PgPool) -> Self {
        Self::new(pool, VisibilityFilter::Visible)
    }
}

#[async_trait]
impl<'a> ListingSource for GalleryListing<'a> {
    type Item = GalleryItem;
    type Error = sqlx::Error;

    async fn count(&self) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM gallery_items {}", self.where_sql);
        sqlx::query_scalar::<_, i64>(&query).fetch_one(self.pool).await
    }

    async fn fetch_page(
        &self,
        offset: i64,
        limit: Option<i64>,
    ) -> Result<Vec<GalleryItem>, sqlx::Error> {
        let query = format!(
            "SELECT {GALLERY_COLUMNS} FROM gallery_items {} \
             ORDER BY created_at DESC, id DESC \
             OFFSET $1 LIMIT $2",
            self.where_sql
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(offset)
            .bind(limit)
            .fetch_all(self.pool)
            .await
    }

    async fn group_categories(&self) -> Result<Vec<CategoryTally>, sqlx::Error> {
        let query = format!(
            "SELECT category, COUNT(*), MAX(created_at) FROM gallery_items {} \
             GROUP BY category",
            self.where_sql
        );
        let rows = sqlx::query_as::<_, (String, i64, Option<Timestamp>)>(&query)
            .fetch_all(self.pool)
            .await?;
        Ok(tally_rows(rows))
    }

    async fn scan_categories(&self) -> Result<Vec<CategorySample>, sqlx::Error> {
        let query = format!("SELECT category, created_at FROM gallery_items {}", self.where_sql);
        let rows = sqlx::query_as::<_, (String, Timestamp)>(&query)
            .fetch_all(self.pool)
            .await?;
        Ok(sample_rows(rows))
    }
}

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------

/// Sort order of a menu listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOrder {
    /// Admin table: most recently updated first.
    RecentlyUpdated,
    /// Public menu: category, then name.
    CategoryName,
}

impl MenuOrder {
    fn sql(self) -> &'static str {
        match self {
            MenuOrder::RecentlyUpdated => "updated_at DESC, id DESC",
            MenuOrder::CategoryName => "category ASC, name ASC, id ASC",
        }
    }
}

/// Menu items matching a visibility filter and optional search term.
pub struct MenuListing<'a> {
    pool: &'a PgPool,
    order: MenuOrder,
    where_sql: String,
    /// `ILIKE` pattern bound as `$1` when present.
    pattern: Option<String>,
    /// Index of the first bind parameter after the filter binds.
    next_bind: u32,
}

impl<'a> MenuListing<'a> {
    pub fn new(
        pool: &'a PgPool,
        visibility: VisibilityFilter,
        search: Option<&str>,
        order: MenuOrder,
    ) -> Self {
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if let Some(condition) = visibility_condition(visibility) {
            conditions.push(condition.to_string());
        }
        let pattern = search.map(contains_pattern);
        if pattern.is_some() {
            conditions.push(format!(
                "(name ILIKE ${bind_idx} ESCAPE '\\' \
                 OR category ILIKE ${bind_idx} ESCAPE '\\' \
                 OR COALESCE(description, '') ILIKE ${bind_idx} ESCAPE '\\')"
            ));
            bind_idx += 1;
        }

        Self {
            pool,
            order,
            where_sql: where_clause(&conditions),
            pattern,
            next_bind: bind_idx,
        }
    }

    /// Visible items in public menu order.
    pub fn public(pool: &'a PgPool) -> Self {
        Self::new(pool, VisibilityFilter::Visible, None, MenuOrder::CategoryName)
    }
}

#[async_trait]
impl<'a> ListingSource for MenuListing<'a> {
    type Item = MenuItem;
    type Error = sqlx::Error;

    async fn count(&self) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM menu_items {}", self.where_sql);
        let mut q = sqlx::query_scalar::<_, i64>(&query);
        if let Some(pattern) = &self.pattern {
            q = q.bind(pattern);
        }
        q.fetch_one(self.pool).await
    }

    async fn fetch_page(&self, offset: i64, limit: Option<i64>) -> Result<Vec<MenuItem>, sqlx::Error> {
        let offset_idx = self.next_bind;
        let limit_idx = self.next_bind + 1;
        let query = format!(
            "SELECT {MENU_COLUMNS} FROM menu_items {} \
             ORDER BY {} \
             OFFSET ${offset_idx} LIMIT ${limit_idx}",
            self.where_sql,
            self.order.sql()
        );
        let mut q = sqlx::query_as::<_, MenuItem>(&query);
        if let Some(pattern) = &self.pattern {
            q = q.bind(pattern);
        }
        q.bind(offset).bind(limit).fetch_all(self.pool).await
    }

    async fn group_categories(&self) -> Result<Vec<CategoryTally>, sqlx::Error> {
        let query = format!(
            "SELECT category, COUNT(*), MAX(created_at) FROM menu_items {} \
             GROUP BY category",
            self.where_sql
        );
        let mut q = sqlx::query_as::<_, (String, i64, Option<Timestamp>)>(&query);
        if let Some(pattern) = &self.pattern {
            q = q.bind(pattern);
        }
        Ok(tally_rows(q.fetch_all(self.pool).await?))
    }

    async fn scan_categories(&self) -> Result<Vec<CategorySample>, sqlx::Error> {
        let query = format!("SELECT category, created_at FROM menu_items {}", self.where_sql);
        let mut q = sqlx::query_as::<_, (String, Timestamp)>(&query);
        if let Some(pattern) = &self.pattern {
            q = q.bind(pattern);
        }
        Ok(sample_rows(q.fetch_all(self.pool).await?))
    }
}
