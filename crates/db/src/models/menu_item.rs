//! Menu item models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use flamingo_core::error::CoreError;
use flamingo_core::fallback::FALLBACK_MENU;
use flamingo_core::listing::ListingRecord;
use flamingo_core::patch::{blank_to_none, double_option};
use flamingo_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `menu_items` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub image_url: Option<String>,
    pub visible: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ListingRecord for MenuItem {
    fn category(&self) -> &str {
        &self.category
    }

    fn created_at(&self) -> Option<Timestamp> {
        Some(self.created_at)
    }
}

impl MenuItem {
    /// The compiled-in placeholder menu, with synthetic negative ids.
    pub fn fallback_items() -> Vec<MenuItem> {
        FALLBACK_MENU
            .iter()
            .enumerate()
            .map(|(idx, entry)| MenuItem {
                id: -(idx as DbId + 1),
                name: entry.name.to_string(),
                description: Some(entry.description.to_string()),
                price: entry.price,
                category: entry.category.to_string(),
                image_url: entry.image_url.map(str::to_string),
                visible: true,
                created_at: Timestamp::default(),
                updated_at: Timestamp::default(),
            })
            .collect()
    }
}

/// The public projection of a menu item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicMenuItem {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub image_url: Option<String>,
}

impl From<MenuItem> for PublicMenuItem {
    fn from(item: MenuItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            price: item.price,
            category: item.category,
            image_url: item.image_url,
        }
    }
}

// ---------------------------------------------------------------------------
// Price input
// ---------------------------------------------------------------------------

/// A price as submitted by the admin form: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

impl PriceInput {
    /// Parse into a non-negative amount.
    pub fn amount(&self) -> Result<f64, CoreError> {
        let value = match self {
            PriceInput::Number(n) => Some(*n),
            PriceInput::Text(s) => s.trim().parse::<f64>().ok(),
        };
        match value {
            Some(v) if !v.is_finite() => Err(invalid_price()),
            Some(v) if v < 0.0 => Err(CoreError::Validation("Price cannot be negative.".into())),
            Some(v) => Ok(v),
            None => Err(invalid_price()),
        }
    }
}

fn invalid_price() -> CoreError {
    CoreError::Validation("Price must be a valid number.".into())
}

fn validate_price(price: &PriceInput) -> Result<(), ValidationError> {
    price.amount().map(|_| ()).map_err(|err| {
        let message = match err {
            CoreError::Validation(msg) => msg,
            other => other.to_string(),
        };
        ValidationError::new("price").with_message(message.into())
    })
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a menu item.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuItem {
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub price: PriceInput,
    #[validate(length(min = 1, message = "Category is required."))]
    pub category: String,
    #[validate(url(message = "Image URL must be a valid URL."))]
    pub image_url: Option<String>,
    pub visible: Option<bool>,
}

impl CreateMenuItem {
    /// Trim text fields; blank description and image URL become absent.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: blank_to_none(self.description),
            category: self.category.trim().to_string(),
            image_url: blank_to_none(self.image_url),
            ..self
        }
    }
}

/// DTO for partially updating a menu item.
///
/// `image_url` distinguishes absent (keep) from `null` (clear).
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_menu_update"))]
pub struct UpdateMenuItem {
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub price: Option<PriceInput>,
    #[validate(length(min = 1, message = "Category is required."))]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(url(message = "Image URL must be a valid URL."))]
    pub image_url: Option<Option<String>>,
    pub visible: Option<bool>,
}

impl UpdateMenuItem {
    /// Trim text fields. Blank description or image URL mean "no change";
    /// only an explicit `null` clears the image.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.map(|n| n.trim().to_string()),
            description: blank_to_none(self.description),
            category: self.category.map(|c| c.trim().to_string()),
            image_url: match self.image_url {
                Some(Some(url)) => blank_to_none(Some(url)).map(Some),
                other => other,
            },
            ..self
        }
    }

    pub fn has_changes(&self) -> bool {
        self.name.is_some()
            || self.description.is_some()
            || self.price.is_some()
            || self.category.is_some()
            || self.image_url.is_some()
            || self.visible.is_some()
    }
}

fn validate_menu_update(dto: &UpdateMenuItem) -> Result<(), ValidationError> {
    if dto.has_changes() {
        Ok(())
    } else {
        Err(ValidationError::new("empty_update")
            .with_message("Provide at least one field to update.".into()))
    }
}
