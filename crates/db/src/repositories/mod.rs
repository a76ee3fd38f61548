//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod gallery_item_repo;
pub mod menu_item_repo;
pub mod message_repo;
pub mod preference_repo;
pub mod reservation_repo;
pub mod user_repo;

pub use gallery_item_repo::GalleryItemRepo;
pub use menu_item_repo::MenuItemRepo;
pub use message_repo::MessageRepo;
pub use preference_repo::PreferenceRepo;
pub use reservation_repo::ReservationRepo;
pub use user_repo::UserRepo;
