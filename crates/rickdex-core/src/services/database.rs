//! Shared database service wrapper used across clients.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::watch;

use super::FavoriteStore;
use crate::db::{Database, FavoriteRepository, SqliteFavoriteRepository};
use crate::models::{CharacterId, FavoriteRecord};
use crate::{Error, Result};

/// Files SQLite keeps next to the database in WAL or rollback-journal mode
const SQLITE_SIDECAR_SUFFIXES: [&str; 3] = ["-wal", "-shm", "-journal"];

/// Thread-safe service for DB and repository operations.
///
/// `rusqlite::Connection` is not `Sync`, so the database sits behind a
/// `Mutex` and every query runs on the blocking pool.
#[derive(Clone)]
pub struct DatabaseService {
    db: Arc<Mutex<Database>>,
    db_path: Option<PathBuf>,
    revision: Arc<watch::Sender<u64>>,
}

impl std::fmt::Debug for DatabaseService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseService")
            .field("db_path", &self.db_path)
            .finish_non_exhaustive()
    }
}

impl DatabaseService {
    /// Open a database service at the given filesystem path.
    ///
    /// A file that is not a database is moved aside and a fresh store is
    /// created in its place.
    pub async fn open_path(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let path = db_path.clone();
        let db = tokio::task::spawn_blocking(move || Self::open_with_recovery(&path))
            .await
            .map_err(|error| {
                Error::Database(format!("Failed to spawn blocking task: {error}"))
            })??;

        tracing::debug!("Opened favorites store at {}", db_path.display());
        Ok(Self::from_database(db, Some(db_path)))
    }

    /// Open an in-memory database service (primarily for tests).
    pub fn open_in_memory() -> Result<Self> {
        let db = Database::open_in_memory()?;
        Ok(Self::from_database(db, None))
    }

    fn from_database(db: Database, db_path: Option<PathBuf>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            db: Arc::new(Mutex::new(db)),
            db_path,
            revision: Arc::new(revision),
        }
    }

    fn open_with_recovery(db_path: &Path) -> Result<Database> {
        match Database::open(db_path) {
            Ok(db) => Ok(db),
            Err(error) if Self::is_corrupted_db_error(&error) => {
                tracing::warn!(
                    "Detected invalid favorites store at {}: {}. Moving it aside and retrying once.",
                    db_path.display(),
                    error
                );
                Self::quarantine_corrupted_db_files(db_path)?;
                Database::open(db_path)
            }
            Err(error) => Err(error),
        }
    }

    fn is_corrupted_db_error(error: &Error) -> bool {
        let message = error.to_string().to_ascii_lowercase();
        message.contains("file is not a database") || message.contains("malformed")
    }

    fn quarantine_corrupted_db_files(db_path: &Path) -> Result<()> {
        if db_path.exists() {
            let timestamp = chrono::Utc::now().timestamp_millis();
            let base_name = db_path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("rickdex.db");
            let backup_path = db_path.with_file_name(format!("{base_name}.corrupt-{timestamp}"));

            std::fs::rename(db_path, &backup_path)?;
            tracing::warn!(
                "Moved corrupted favorites store from {} to {}",
                db_path.display(),
                backup_path.display()
            );
        }

        let Some(base_name) = db_path.file_name().and_then(|name| name.to_str()) else {
            return Ok(());
        };
        for suffix in SQLITE_SIDECAR_SUFFIXES {
            let path = db_path.with_file_name(format!("{base_name}{suffix}"));
            if path.is_file() {
                std::fs::remove_file(&path)?;
                tracing::warn!("Removed stale store file {}", path.display());
            }
        }

        Ok(())
    }

    /// Path of the backing file, `None` for in-memory services.
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Watch the store's write revision; it increments after every write.
    pub fn subscribe_changes(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Number of stored favorites.
    pub async fn count(&self) -> Result<usize> {
        self.with_repository(|repo| repo.count()).await
    }

    async fn with_repository<T, F>(&self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&SqliteFavoriteRepository<'_>) -> Result<T> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let db = db
                .lock()
                .map_err(|_| Error::Database("favorites store lock poisoned".to_string()))?;
            let repo = SqliteFavoriteRepository::new(db.connection());
            operation(&repo)
        })
        .await
        .map_err(|error| Error::Database(format!("Failed to spawn blocking task: {error}")))?
    }

    fn bump_revision(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }
}

#[async_trait]
impl FavoriteStore for DatabaseService {
    async fn upsert(&self, record: &FavoriteRecord) -> Result<()> {
        let record = record.clone();
        self.with_repository(move |repo| repo.upsert(&record)).await?;
        self.bump_revision();
        Ok(())
    }

    async fn delete(&self, record: &FavoriteRecord) -> Result<()> {
        let record = record.clone();
        let removed = self
            .with_repository(move |repo| repo.delete(&record))
            .await?;
        if removed {
            self.bump_revision();
        }
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<FavoriteRecord>> {
        self.with_repository(|repo| repo.get_all()).await
    }

    async fn get_by_id(&self, id: CharacterId) -> Result<Option<FavoriteRecord>> {
        self.with_repository(move |repo| repo.get_by_id(id)).await
    }
}
