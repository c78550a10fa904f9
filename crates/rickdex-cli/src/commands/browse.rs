use rickdex_core::catalog::{
    CatalogError, CatalogHandle, CatalogSnapshot, Cursor, LoadOutcome, ViewMode,
};
use rickdex_core::config::ClientConfig;
use rickdex_core::CharacterId;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::commands::common::{format_entry_line, format_entry_lines, open_catalog};
use crate::error::CliError;

const HELP: &str = "\
Commands:
  <enter>, more, m     load the next page
  fav <id>, f <id>     toggle a favorite
  all                  show the full catalog
  favorites, favs      show favorites only
  refresh, r           reload the current view from the start
  show, s              print the current list
  help, h, ?           show this help
  quit, q              exit";

/// A single line of input in the interactive browser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    More,
    Favorite(CharacterId),
    Mode(ViewMode),
    Refresh,
    Show,
    Help,
    Quit,
}

pub fn parse_intent(line: &str) -> Result<Intent, String> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(Intent::More);
    };

    let intent = match command.to_ascii_lowercase().as_str() {
        "more" | "m" | "next" | "n" => Intent::More,
        "fav" | "f" | "toggle" => {
            let raw = words
                .next()
                .ok_or_else(|| "Usage: fav <id>".to_string())?;
            let id = raw
                .parse::<CharacterId>()
                .map_err(|_| format!("Invalid character ID: {raw}"))?;
            Intent::Favorite(id)
        }
        "all" => Intent::Mode(ViewMode::All),
        "favorites" | "favs" => Intent::Mode(ViewMode::FavoritesOnly),
        "refresh" | "r" => Intent::Refresh,
        "show" | "s" | "ls" => Intent::Show,
        "help" | "h" | "?" => Intent::Help,
        "quit" | "q" | "exit" => Intent::Quit,
        other => return Err(format!("Unknown command: {other} (type 'help')")),
    };

    if words.next().is_some() {
        return Err(format!("Too many arguments for '{command}'"));
    }
    Ok(intent)
}

pub async fn run_browse(config: &ClientConfig) -> Result<(), CliError> {
    let (catalog, _store) = open_catalog(config).await?;
    println!("{HELP}");
    println!();

    let outcome = catalog.load_more().await?;
    report_outcome(&catalog, &outcome);
    print_all(&catalog.snapshot());
    drain_error(&catalog).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let intent = match parse_intent(&line) {
            Ok(intent) => intent,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match intent {
            Intent::Quit => break,
            Intent::Help => println!("{HELP}"),
            Intent::Show => print_all(&catalog.snapshot()),
            Intent::More => {
                let before = catalog.snapshot().entries.len();
                let outcome = catalog.load_more().await?;
                report_outcome(&catalog, &outcome);
                for entry in catalog.snapshot().entries.iter().skip(before) {
                    println!("{}", format_entry_line(entry));
                }
            }
            Intent::Favorite(id) => match catalog.toggle_favorite(id).await {
                Ok(true) => println!("Added {id} to favorites"),
                Ok(false) => println!("Removed {id} from favorites"),
                Err(error @ CatalogError::Closed) => {
                    return Err(error.into());
                }
                Err(error) => println!("{error}"),
            },
            Intent::Mode(mode) => {
                let outcome = catalog.switch_mode(mode).await?;
                report_outcome(&catalog, &outcome);
                print_all(&catalog.snapshot());
            }
            Intent::Refresh => {
                let outcome = catalog.refresh().await?;
                report_outcome(&catalog, &outcome);
                print_all(&catalog.snapshot());
            }
        }

        drain_error(&catalog).await?;
    }

    catalog.shutdown().await?;
    Ok(())
}

fn report_outcome(catalog: &CatalogHandle, outcome: &LoadOutcome) {
    match outcome {
        LoadOutcome::Applied { .. } | LoadOutcome::Failed(_) => {}
        LoadOutcome::Exhausted => println!("End of catalog."),
        LoadOutcome::NotPaginated => println!("Favorites are shown all at once."),
        LoadOutcome::Busy => println!("Still loading..."),
        LoadOutcome::Superseded => tracing::debug!(
            "Load superseded in {:?} mode",
            catalog.snapshot().mode
        ),
    }
}

fn print_all(snapshot: &CatalogSnapshot) {
    println!("{}", status_line(snapshot));
    for line in format_entry_lines(&snapshot.entries) {
        println!("{line}");
    }
}

pub fn status_line(snapshot: &CatalogSnapshot) -> String {
    let view = match snapshot.mode {
        ViewMode::All => "All characters",
        ViewMode::FavoritesOnly => "Favorites",
    };
    let favorites = snapshot
        .entries
        .iter()
        .filter(|entry| entry.is_favorite)
        .count();
    let more = match (snapshot.mode, snapshot.cursor) {
        (ViewMode::All, Cursor::Page(_)) => ", more available",
        _ => "",
    };
    format!(
        "== {view}: {} shown, {favorites} favorite{}{more} ==",
        snapshot.entries.len(),
        if favorites == 1 { "" } else { "s" }
    )
}

async fn drain_error(catalog: &CatalogHandle) -> Result<(), CliError> {
    if let Some(message) = catalog.current_error() {
        eprintln!("Error: {message}");
        catalog.clear_error().await?;
    }
    Ok(())
}
