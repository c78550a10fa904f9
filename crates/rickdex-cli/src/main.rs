//! Rickdex CLI - browse the Rick and Morty character catalog from the terminal
//!
//! Pages through the public catalog and keeps favorites in a local database.

mod cli;
mod commands;
mod error;

use clap::{CommandFactory, Parser};
use rickdex_core::config::{ClientConfig, ConfigOverrides};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::browse::run_browse;
use crate::commands::favorites::run_favorites;
use crate::commands::list::run_list;
use crate::commands::toggle::run_toggle;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let overrides = ConfigOverrides {
        api_base_url: cli.api_url,
        request_timeout_secs: cli.timeout,
        db_path: cli.db_path,
    };

    match cli.command {
        Some(Commands::List { pages, json }) => {
            run_list(pages, json, &load_config(overrides)?).await?;
        }
        Some(Commands::Favorites { json }) => {
            run_favorites(json, &load_config(overrides)?).await?;
        }
        Some(Commands::Toggle { id, pages }) => {
            run_toggle(&id, pages, &load_config(overrides)?).await?;
        }
        Some(Commands::Browse) => run_browse(&load_config(overrides)?).await?,
        None => {
            Cli::command().print_help().map_err(CliError::Io)?;
            println!();
        }
    }

    Ok(())
}

fn load_config(overrides: ConfigOverrides) -> Result<ClientConfig, CliError> {
    let config = ClientConfig::load(overrides).map_err(CliError::Config)?;
    tracing::debug!(
        "Using API {} and favorites store {}",
        config.api_base_url,
        config.db_path.display()
    );
    Ok(config)
}
