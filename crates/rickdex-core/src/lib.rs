//! rickdex-core - Core library for Rickdex
//!
//! This crate contains the models, remote character source, local favorites
//! store, and the catalog state machine used by every Rickdex front end.

pub mod api;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use error::{Error, Result};
pub use models::{Character, CharacterId, FavoriteRecord, ViewEntry};
