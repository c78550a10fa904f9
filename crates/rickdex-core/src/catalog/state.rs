//! Catalog state and its pure transitions

use std::collections::HashSet;

use serde::Serialize;

use super::{Cursor, ViewMode};
use crate::api::Page;
use crate::models::{Character, CharacterId, FavoriteRecord, ViewEntry};

/// Point-in-time view of the catalog, as published to observers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogSnapshot {
    pub mode: ViewMode,
    pub cursor: Cursor,
    /// A remote page request is in flight
    pub loading: bool,
    /// A refresh is in progress
    pub refreshing: bool,
    pub entries: Vec<ViewEntry>,
}

/// State owned by the catalog actor
#[derive(Debug, Default)]
pub(super) struct CatalogState {
    pub mode: ViewMode,
    pub cursor: Cursor,
    pub refreshing: bool,
    pub entries: Vec<ViewEntry>,
    /// Favorite IDs read at the start of the last load. Only used to flag
    /// freshly fetched characters; toggles made while a fetch is in flight
    /// are not reflected in that fetch's flags.
    local_favorites: HashSet<CharacterId>,
}

impl CatalogState {
    /// Enter `mode` with an empty list and the cursor back on page 1.
    pub fn reset(&mut self, mode: ViewMode) {
        self.mode = mode;
        self.entries.clear();
        self.cursor = Cursor::FIRST;
    }

    pub fn remember_favorites(&mut self, records: &[FavoriteRecord]) {
        self.local_favorites = records.iter().map(|record| record.id).collect();
    }

    /// Append a fetched page and advance the cursor. Returns the number of
    /// entries appended.
    ///
    /// Entries accumulate in arrival order; an ID that shows up on two pages
    /// is listed twice.
    pub fn append_page(&mut self, page: Page) -> usize {
        let appended = page.characters.len();
        let local_favorites = &self.local_favorites;
        self.entries
            .extend(page.characters.into_iter().map(|character| {
                let is_favorite = local_favorites.contains(&character.id);
                ViewEntry::new(character, is_favorite)
            }));
        self.cursor = Cursor::after(page.next_page);
        appended
    }

    /// Replace the list with one flagged entry per stored favorite.
    pub fn show_favorites(&mut self, records: &[FavoriteRecord]) -> usize {
        self.entries = records.iter().map(ViewEntry::from).collect();
        self.entries.len()
    }

    /// Set the favorite flag on every loaded entry with `id`. Returns how
    /// many entries changed.
    pub fn set_favorite(&mut self, id: CharacterId, is_favorite: bool) -> usize {
        let mut changed = 0;
        for entry in self.entries.iter_mut().filter(|entry| entry.id() == id) {
            if entry.is_favorite != is_favorite {
                entry.is_favorite = is_favorite;
                changed += 1;
            }
        }
        changed
    }

    pub fn find_character(&self, id: CharacterId) -> Option<&Character> {
        self.entries
            .iter()
            .find(|entry| entry.id() == id)
            .map(|entry| &entry.character)
    }

    pub fn snapshot(&self, loading: bool) -> CatalogSnapshot {
        CatalogSnapshot {
            mode: self.mode,
            cursor: self.cursor,
            loading,
            refreshing: self.refreshing,
            entries: self.entries.clone(),
        }
    }
}
