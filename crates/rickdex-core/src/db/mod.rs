//! Database layer for Rickdex

mod connection;
mod migrations;
mod repository;

pub use connection::Database;
pub use repository::{FavoriteRepository, SqliteFavoriteRepository};
