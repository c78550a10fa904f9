use rickdex_core::catalog::{CatalogHandle, LoadOutcome};
use rickdex_core::config::ClientConfig;
use rickdex_core::services::FavoriteStore;
use rickdex_core::CharacterId;

use crate::commands::common::{normalize_character_id, open_catalog};
use crate::error::CliError;

pub async fn run_toggle(id: &str, pages: u32, config: &ClientConfig) -> Result<(), CliError> {
    let id = normalize_character_id(id)?;
    let (catalog, store) = open_catalog(config).await?;

    // Removing a favorite needs no network; adding one needs the character loaded
    if store.get_by_id(id).await?.is_none() {
        find_character(&catalog, id, pages.max(1)).await?;
    }

    let name = catalog
        .snapshot()
        .entries
        .iter()
        .find(|entry| entry.id() == id)
        .map(|entry| entry.character.name.clone());
    let is_favorite = catalog.toggle_favorite(id).await?;
    catalog.shutdown().await?;

    let label = name.map_or_else(|| id.to_string(), |name| format!("{id} ({name})"));
    if is_favorite {
        println!("Added {label} to favorites");
    } else {
        println!("Removed {label} from favorites");
    }
    Ok(())
}

/// Load pages until `id` shows up, giving up after `max_pages`.
pub async fn find_character(
    catalog: &CatalogHandle,
    id: CharacterId,
    max_pages: u32,
) -> Result<(), CliError> {
    let contains = |catalog: &CatalogHandle| {
        catalog
            .snapshot()
            .entries
            .iter()
            .any(|entry| entry.id() == id)
    };

    let mut loaded = 0;
    while !contains(catalog) {
        if loaded >= max_pages {
            return Err(CliError::CharacterNotFound {
                id,
                pages: max_pages,
            });
        }
        match catalog.load_more().await? {
            LoadOutcome::Applied { .. } => loaded += 1,
            LoadOutcome::Failed(message) => return Err(CliError::Load(message)),
            _ => {
                return Err(CliError::CharacterNotFound {
                    id,
                    pages: loaded,
                })
            }
        }
    }
    Ok(())
}
