//! Favorite record, the durable projection of a favorited character

use serde::{Deserialize, Serialize};

use super::{Character, CharacterId};

/// A locally persisted favorite
///
/// Holds just enough to redisplay the character without a network call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub id: CharacterId,
    pub name: String,
    pub image_url: String,
    /// When the favorite was created (Unix ms)
    pub favorited_at: i64,
}

impl FavoriteRecord {
    /// Project a character into a new favorite record stamped with the current time
    #[must_use]
    pub fn from_character(character: &Character) -> Self {
        Self {
            id: character.id,
            name: character.name.clone(),
            image_url: character.image.clone(),
            favorited_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Rebuild a displayable character; descriptive fields come back empty
    #[must_use]
    pub fn to_character(&self) -> Character {
        Character::new(self.id, self.name.clone(), self.image_url.clone())
    }
}
