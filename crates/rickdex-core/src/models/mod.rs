//! Data models for Rickdex

mod character;
mod entry;
mod favorite;

pub use character::{Character, CharacterId, Place};
pub use entry::ViewEntry;
pub use favorite::FavoriteRecord;
