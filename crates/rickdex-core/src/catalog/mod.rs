//! Catalog state machine.
//!
//! Merges remote character pages with local favorite flags, tracks the
//! pagination cursor, and switches between the full catalog and the
//! favorites-only view. A single actor task owns the state; front ends drive
//! it through a cloneable [`CatalogHandle`] and observe it through `watch`
//! channels.

mod actor;
mod state;

pub use actor::{spawn, CatalogHandle};
pub use state::CatalogSnapshot;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::CharacterId;

/// Which list the catalog presents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Every character from the remote catalog, page by page
    #[default]
    All,
    /// Only locally stored favorites, loaded in one shot
    FavoritesOnly,
}

/// Pagination cursor: the next page to request, or the end of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    Page(u32),
    End,
}

impl Cursor {
    pub const FIRST: Self = Self::Page(1);

    /// Cursor following a page whose `next` link resolved to `next_page`
    #[must_use]
    pub const fn after(next_page: Option<u32>) -> Self {
        match next_page {
            Some(page) => Self::Page(page),
            None => Self::End,
        }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::FIRST
    }
}

/// What a load request ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Entries were updated; `entries` is the number added (or loaded, in
    /// favorites mode)
    Applied { entries: usize },
    /// Another load was in flight; the request was dropped
    Busy,
    /// End-of-list trigger in favorites mode, which is not paginated
    NotPaginated,
    /// The cursor is already past the last page
    Exhausted,
    /// The load failed; the message was also published on the error channel
    Failed(String),
    /// A mode switch, refresh or shutdown replaced this load before it finished
    Superseded,
}

impl LoadOutcome {
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Errors returned by catalog operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The favorites store failed
    #[error("Storage error: {0}")]
    Store(String),

    /// Toggle requested for a character that is neither loaded nor stored
    #[error("Character {0} is not in the current list")]
    UnknownCharacter(CharacterId),

    /// The catalog actor has stopped
    #[error("Catalog is no longer running")]
    Closed,
}

impl From<crate::Error> for CatalogError {
    fn from(error: crate::Error) -> Self {
        Self::Store(error.to_string())
    }
}
