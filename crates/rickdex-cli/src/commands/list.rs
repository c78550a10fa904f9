use rickdex_core::config::ClientConfig;

use crate::commands::common::{load_pages, open_catalog, print_entries};
use crate::error::CliError;

pub async fn run_list(pages: u32, as_json: bool, config: &ClientConfig) -> Result<(), CliError> {
    let (catalog, _store) = open_catalog(config).await?;
    load_pages(&catalog, pages.max(1)).await?;

    print_entries(&catalog.snapshot().entries, as_json)?;
    catalog.shutdown().await?;
    Ok(())
}
