//! Gallery item models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use flamingo_core::fallback::FALLBACK_GALLERY;
use flamingo_core::listing::ListingRecord;
use flamingo_core::patch::{blank_to_clear, blank_to_none, double_option};
use flamingo_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `gallery_items` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    pub id: DbId,
    pub category: String,
    pub caption: Option<String>,
    pub image_url: String,
    pub visible: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ListingRecord for GalleryItem {
    fn category(&self) -> &str {
        &self.category
    }

    fn created_at(&self) -> Option<Timestamp> {
        Some(self.created_at)
    }
}

impl GalleryItem {
    /// The compiled-in placeholder gallery, with synthetic negative ids.
    pub fn fallback_items() -> Vec<GalleryItem> {
        FALLBACK_GALLERY
            .iter()
            .enumerate()
            .map(|(idx, entry)| GalleryItem {
                id: -(idx as DbId + 1),
                category: entry.category.to_string(),
                caption: Some(entry.caption.to_string()),
                image_url: entry.image_url.to_string(),
                visible: true,
                created_at: Timestamp::default(),
                updated_at: Timestamp::default(),
            })
            .collect()
    }
}

/// The public projection of a gallery item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicGalleryItem {
    pub id: DbId,
    pub category: String,
    pub caption: Option<String>,
    pub image_url: String,
}

impl From<GalleryItem> for PublicGalleryItem {
    fn from(item: GalleryItem) -> Self {
        Self {
            id: item.id,
            category: item.category,
            caption: item.caption,
            image_url: item.image_url,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a gallery item.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGalleryItem {
    #[serde(alias = "gCategory")]
    #[validate(length(min = 1, message = "Category is required."))]
    pub category: String,
    pub caption: Option<String>,
    #[serde(alias = "galleryUrl")]
    #[validate(url(message = "Image URL is required."))]
    pub image_url: String,
    pub visible: Option<bool>,
}

impl CreateGalleryItem {
    /// Trim text fields; a blank caption becomes `None`.
    pub fn normalized(self) -> Self {
        Self {
            category: self.category.trim().to_string(),
            caption: blank_to_none(self.caption),
            image_url: self.image_url.trim().to_string(),
            ..self
        }
    }
}

/// DTO for partially updating a gallery item.
///
/// `caption` distinguishes absent (keep) from `null` or `""` (clear).
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_gallery_update"))]
pub struct UpdateGalleryItem {
    #[serde(alias = "gCategory")]
    #[validate(length(min = 1, message = "Category is required."))]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub caption: Option<Option<String>>,
    #[serde(alias = "galleryUrl")]
    #[validate(url(message = "Image URL is required."))]
    pub image_url: Option<String>,
    pub visible: Option<bool>,
}

impl UpdateGalleryItem {
    pub fn normalized(self) -> Self {
        Self {
            category: self.category.map(|c| c.trim().to_string()),
            caption: blank_to_clear(self.caption),
            image_url: self.image_url.map(|u| u.trim().to_string()),
            ..self
        }
    }

    pub fn has_changes(&self) -> bool {
        self.category.is_some()
            || self.caption.is_some()
            || self.image_url.is_some()
            || self.visible.is_some()
    }
}

fn validate_gallery_update(dto: &UpdateGalleryItem) -> Result<(), ValidationError> {
    if dto.has_changes() {
        Ok(())
    } else {
        Err(ValidationError::new("empty_update")
            .with_message("Provide at least one field to update.".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_accepts_legacy_field_names() {
        let input: CreateGalleryItem = serde_json::from_value(serde_json::json!({
            "gCategory": " Food ",
            "caption": "",
            "galleryUrl": "https://cdn.example.com/a.jpg"
        }))
        .unwrap();
        let input = input.normalized();
        assert!(input.validate().is_ok());
        assert_eq!(input.category, "Food");
        assert_eq!(input.caption, None);
        assert_eq!(input.visible, None);
    }

    #[test]
    fn create_rejects_missing_category_and_bad_url() {
        let input: CreateGalleryItem = serde_json::from_value(serde_json::json!({
            "category": "   ",
            "imageUrl": "not a url"
        }))
        .unwrap();
        let errors = input.normalized().validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("category"));
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn update_caption_clear_and_empty_update() {
        let clear: UpdateGalleryItem =
            serde_json::from_value(serde_json::json!({ "caption": "" })).unwrap();
        let clear = clear.normalized();
        assert_eq!(clear.caption, Some(None));
        assert!(clear.validate().is_ok());

        let empty = UpdateGalleryItem::default();
        assert!(empty.validate().is_err());
    }

    #[test]
    fn fallback_gallery_has_eight_visible_items() {
        let items = GalleryItem::fallback_items();
        assert_eq!(items.len(), 8);
        assert_eq!(items[0].id, -1);
        assert_eq!(items[0].image_url, "/assets/hero-dining.jpg");
    }
}
