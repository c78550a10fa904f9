use std::sync::Arc;

use rickdex_core::api::CharacterApiClient;
use rickdex_core::catalog::{self, CatalogHandle, LoadOutcome};
use rickdex_core::config::ClientConfig;
use rickdex_core::services::DatabaseService;
use rickdex_core::{CharacterId, ViewEntry};
use serde::Serialize;

use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct EntryListItem {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub species: String,
    pub image: String,
    pub favorite: bool,
}

/// Open the favorites store and start a catalog over the configured API.
pub async fn open_catalog(
    config: &ClientConfig,
) -> Result<(CatalogHandle, DatabaseService), CliError> {
    let store = DatabaseService::open_path(&config.db_path).await?;
    let remote = CharacterApiClient::new(config)?;
    let catalog = catalog::spawn(Arc::new(remote), Arc::new(store.clone()));
    Ok((catalog, store))
}

/// Load up to `pages` pages, stopping early at the end of the catalog.
///
/// Returns the number of pages that added entries.
pub async fn load_pages(catalog: &CatalogHandle, pages: u32) -> Result<u32, CliError> {
    let mut loaded = 0;
    while loaded < pages {
        match catalog.load_more().await? {
            LoadOutcome::Applied { .. } => loaded += 1,
            LoadOutcome::Exhausted | LoadOutcome::NotPaginated => break,
            LoadOutcome::Failed(message) => return Err(CliError::Load(message)),
            LoadOutcome::Busy | LoadOutcome::Superseded => {
                return Err(CliError::Load("catalog load was interrupted".to_string()));
            }
        }
    }
    Ok(loaded)
}

pub fn normalize_character_id(id: &str) -> Result<CharacterId, CliError> {
    id.parse::<CharacterId>()
        .ok()
        .filter(|id| id.get() > 0)
        .ok_or_else(|| CliError::InvalidCharacterId(id.trim().to_string()))
}

pub fn entry_to_list_item(entry: &ViewEntry) -> EntryListItem {
    EntryListItem {
        id: entry.character.id.get(),
        name: entry.character.name.clone(),
        status: entry.character.status.clone(),
        species: entry.character.species.clone(),
        image: entry.character.image.clone(),
        favorite: entry.is_favorite,
    }
}

pub fn format_entry_line(entry: &ViewEntry) -> String {
    let marker = if entry.is_favorite { '*' } else { ' ' };
    let details = [
        entry.character.species.as_str(),
        entry.character.status.as_str(),
    ]
    .into_iter()
    .filter(|value| !value.is_empty())
    .collect::<Vec<_>>()
    .join(", ");

    if details.is_empty() {
        format!("{marker} {:>4}  {}", entry.character.id.get(), entry.character.name)
    } else {
        format!(
            "{marker} {:>4}  {} ({details})",
            entry.character.id.get(), entry.character.name
        )
    }
}

pub fn format_entry_lines(entries: &[ViewEntry]) -> Vec<String> {
    if entries.is_empty() {
        return vec!["No characters.".to_string()];
    }
    entries.iter().map(format_entry_line).collect()
}

pub fn print_entries(entries: &[ViewEntry], as_json: bool) -> Result<(), CliError> {
    if as_json {
        let json_items = entries
            .iter()
            .map(entry_to_list_item)
            .collect::<Vec<EntryListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else {
        for line in format_entry_lines(entries) {
            println!("{line}");
        }
    }
    Ok(())
}
