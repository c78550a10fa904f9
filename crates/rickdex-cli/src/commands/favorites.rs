use rickdex_core::catalog::{LoadOutcome, ViewMode};
use rickdex_core::config::ClientConfig;

use crate::commands::common::{open_catalog, print_entries};
use crate::error::CliError;

pub async fn run_favorites(as_json: bool, config: &ClientConfig) -> Result<(), CliError> {
    let (catalog, _store) = open_catalog(config).await?;
    if let LoadOutcome::Failed(message) = catalog.switch_mode(ViewMode::FavoritesOnly).await? {
        return Err(CliError::Load(message));
    }

    print_entries(&catalog.snapshot().entries, as_json)?;
    catalog.shutdown().await?;
    Ok(())
}
