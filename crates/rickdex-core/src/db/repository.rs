//! Favorite repository implementation

use crate::error::Result;
use crate::models::{CharacterId, FavoriteRecord};
use rusqlite::{params, Connection, OptionalExtension};

/// Trait for favorite storage operations
pub trait FavoriteRepository {
    /// Insert a favorite, replacing any record with the same ID
    fn upsert(&self, record: &FavoriteRecord) -> Result<()>;

    /// Delete a favorite, returning whether a row was removed
    fn delete(&self, record: &FavoriteRecord) -> Result<bool>;

    /// List every favorite, oldest first
    fn get_all(&self) -> Result<Vec<FavoriteRecord>>;

    /// Get a favorite by character ID
    fn get_by_id(&self, id: CharacterId) -> Result<Option<FavoriteRecord>>;

    /// Number of stored favorites
    fn count(&self) -> Result<usize>;
}

/// `SQLite` implementation of `FavoriteRepository`
pub struct SqliteFavoriteRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteFavoriteRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Parse a favorite from a database row
    fn parse_favorite(row: &rusqlite::Row<'_>) -> rusqlite::Result<FavoriteRecord> {
        Ok(FavoriteRecord {
            id: CharacterId::new(row.get(0)?),
            name: row.get(1)?,
            image_url: row.get(2)?,
            favorited_at: row.get(3)?,
        })
    }
}

impl FavoriteRepository for SqliteFavoriteRepository<'_> {
    fn upsert(&self, record: &FavoriteRecord) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO favorites (id, name, image_url, favorited_at) VALUES (?, ?, ?, ?)",
            params![
                record.id.get(),
                record.name,
                record.image_url,
                record.favorited_at
            ],
        )?;

        Ok(())
    }

    fn delete(&self, record: &FavoriteRecord) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM favorites WHERE id = ?", params![record.id.get()])?;

        Ok(rows > 0)
    }

    fn get_all(&self) -> Result<Vec<FavoriteRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, image_url, favorited_at
             FROM favorites
             ORDER BY favorited_at ASC, id ASC",
        )?;

        let favorites = stmt
            .query_map([], Self::parse_favorite)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(favorites)
    }

    fn get_by_id(&self, id: CharacterId) -> Result<Option<FavoriteRecord>> {
        let favorite = self
            .conn
            .query_row(
                "SELECT id, name, image_url, favorited_at FROM favorites WHERE id = ?",
                params![id.get()],
                Self::parse_favorite,
            )
            .optional()?;

        Ok(favorite)
    }

    fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM favorites", [], |row| row.get(0))?;

        Ok(usize::try_from(count).unwrap_or_default())
    }
}
