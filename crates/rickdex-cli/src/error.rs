use std::io;

use rickdex_core::api::FetchError;
use rickdex_core::catalog::CatalogError;
use rickdex_core::CharacterId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] rickdex_core::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid character ID: {0}")]
    InvalidCharacterId(String),
    #[error("{0}")]
    Load(String),
    #[error("Character {id} not found in the first {pages} page(s); try --pages")]
    CharacterNotFound { id: CharacterId, pages: u32 },
}
