use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rickdex")]
#[command(about = "Browse Rick and Morty characters and keep your favorites")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to the local favorites database
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Character API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List characters from the catalog
    #[command(alias = "ls")]
    List {
        /// Number of pages to load
        #[arg(short, long, default_value = "1")]
        pages: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List favorite characters
    Favorites {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark or unmark a character as favorite
    #[command(alias = "fav")]
    Toggle {
        /// Character ID
        id: String,
        /// Pages to search for the character when it is not yet a favorite
        #[arg(short, long, default_value = "1")]
        pages: u32,
    },
    /// Interactive browser: scroll, favorite, switch views
    Browse,
}
