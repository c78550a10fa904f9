//! Error types for rickdex-core

use thiserror::Error;

/// Result type alias using rickdex-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in rickdex-core storage and configuration
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
