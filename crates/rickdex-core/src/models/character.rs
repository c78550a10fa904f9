//! Character model, as served by the remote catalog

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a character, stable across requests and shared with the
/// favorites store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(i64);

impl CharacterId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for CharacterId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CharacterId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// A named place reference (origin or last known location)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// A character from the remote catalog
///
/// Only `id`, `name` and `image` drive catalog behavior; the descriptive
/// fields are carried for display and default to empty when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Unique identifier, the merge key with favorites
    pub id: CharacterId,
    /// Display name
    pub name: String,
    /// Avatar image URL
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub species: String,
    /// Sub-species or variant (`type` on the wire)
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub origin: Place,
    #[serde(default)]
    pub location: Place,
    /// Episode URLs the character appears in
    #[serde(default)]
    pub episode: Vec<String>,
    #[serde(default)]
    pub url: String,
    /// Creation timestamp as reported by the API (RFC 3339)
    #[serde(default)]
    pub created: String,
}

impl Character {
    /// Create a character with only the fields the catalog needs
    #[must_use]
    pub fn new(id: CharacterId, name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image: image.into(),
            status: String::new(),
            species: String::new(),
            kind: String::new(),
            gender: String::new(),
            origin: Place::default(),
            location: Place::default(),
            episode: Vec::new(),
            url: String::new(),
            created: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_id_parse() {
        let id: CharacterId = " 42 ".parse().unwrap();
        assert_eq!(id, CharacterId::new(42));
        assert!("abc".parse::<CharacterId>().is_err());
    }

    #[test]
    fn test_character_deserialize_full() {
        let payload = r#"{
            "id": 1,
            "name": "Rick Sanchez",
            "status": "Alive",
            "species": "Human",
            "type": "",
            "gender": "Male",
            "origin": { "name": "Earth (C-137)", "url": "https://rickandmortyapi.com/api/location/1" },
            "location": { "name": "Citadel of Ricks", "url": "https://rickandmortyapi.com/api/location/3" },
            "image": "https://rickandmortyapi.com/api/character/avatar/1.jpeg",
            "episode": ["https://rickandmortyapi.com/api/episode/1"],
            "url": "https://rickandmortyapi.com/api/character/1",
            "created": "2017-11-04T18:48:46.250Z"
        }"#;

        let character: Character = serde_json::from_str(payload).unwrap();
        assert_eq!(character.id, CharacterId::new(1));
        assert_eq!(character.name, "Rick Sanchez");
        assert_eq!(character.origin.name, "Earth (C-137)");
        assert_eq!(character.episode.len(), 1);
    }

    #[test]
    fn test_character_deserialize_sparse() {
        let payload = r#"{ "id": 7, "name": "Abradolf Lincler", "type": "Genetic experiment" }"#;
        let character: Character = serde_json::from_str(payload).unwrap();
        assert_eq!(character.kind, "Genetic experiment");
        assert!(character.image.is_empty());
        assert!(character.episode.is_empty());
    }
}
