//! Async services shared by Rickdex front ends

mod database;

pub use database::DatabaseService;

use async_trait::async_trait;

use crate::models::{CharacterId, FavoriteRecord};
use crate::Result;

/// Local favorites store as seen by the catalog
///
/// Each call is individually atomic. There is no multi-record transaction.
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// Insert a favorite, replacing any record with the same ID.
    async fn upsert(&self, record: &FavoriteRecord) -> Result<()>;

    /// Delete a favorite by its ID.
    async fn delete(&self, record: &FavoriteRecord) -> Result<()>;

    /// Snapshot of every stored favorite.
    async fn get_all(&self) -> Result<Vec<FavoriteRecord>>;

    /// Look up a single favorite.
    async fn get_by_id(&self, id: CharacterId) -> Result<Option<FavoriteRecord>>;
}
