//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` + `Validate` request DTOs with a `normalized()` trim pass
//!   that handlers run before validation

pub mod gallery_item;
pub mod menu_item;
pub mod message;
pub mod preference;
pub mod reservation;
pub mod user;
