//! View entry, the unit the presentation layer renders

use serde::{Deserialize, Serialize};

use super::{Character, CharacterId, FavoriteRecord};

/// A character annotated with its current favorite status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewEntry {
    pub character: Character,
    pub is_favorite: bool,
}

impl ViewEntry {
    #[must_use]
    pub const fn new(character: Character, is_favorite: bool) -> Self {
        Self {
            character,
            is_favorite,
        }
    }

    #[must_use]
    pub const fn id(&self) -> CharacterId {
        self.character.id
    }
}

impl From<&FavoriteRecord> for ViewEntry {
    fn from(record: &FavoriteRecord) -> Self {
        Self::new(record.to_character(), true)
    }
}
