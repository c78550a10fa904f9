//! Catalog actor and its handle

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use super::state::{CatalogSnapshot, CatalogState};
use super::{CatalogError, Cursor, LoadOutcome, ViewMode};
use crate::api::{FetchError, Page, RemoteSource};
use crate::models::{CharacterId, FavoriteRecord};
use crate::services::FavoriteStore;

const COMMAND_BUFFER: usize = 32;

enum Command {
    LoadMore {
        reply: oneshot::Sender<LoadOutcome>,
    },
    SwitchMode {
        mode: ViewMode,
        reply: oneshot::Sender<LoadOutcome>,
    },
    Refresh {
        reply: oneshot::Sender<LoadOutcome>,
    },
    ToggleFavorite {
        id: CharacterId,
        reply: oneshot::Sender<Result<bool, CatalogError>>,
    },
    ClearError,
    Shutdown,
}

/// Why a load was started; only the end-of-list trigger is refused in
/// favorites mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    EndOfList,
    Reload,
}

/// Result of a remote fetch, tagged with the generation that started it
struct Fetched {
    generation: u64,
    result: Result<Page, FetchError>,
}

/// The single in-flight remote load
struct InFlight {
    generation: u64,
    task: JoinHandle<()>,
    reply: oneshot::Sender<LoadOutcome>,
}

/// Cloneable front door to a running catalog.
///
/// Every operation resolves once its effects have been applied and
/// published. Dropping every handle stops the actor.
#[derive(Clone)]
pub struct CatalogHandle {
    commands: mpsc::Sender<Command>,
    snapshot: watch::Receiver<CatalogSnapshot>,
    errors: watch::Receiver<Option<String>>,
}

impl std::fmt::Debug for CatalogHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogHandle")
            .field("snapshot", &*self.snapshot.borrow())
            .finish_non_exhaustive()
    }
}

/// Start a catalog actor on the current tokio runtime.
///
/// The catalog starts empty in [`ViewMode::All`] with the cursor on page 1;
/// call [`CatalogHandle::load_more`] for the first page.
pub fn spawn(remote: Arc<dyn RemoteSource>, store: Arc<dyn FavoriteStore>) -> CatalogHandle {
    let (commands, command_rx) = mpsc::channel(COMMAND_BUFFER);
    let (fetched_tx, fetched_rx) = mpsc::unbounded_channel();
    let (snapshot_tx, snapshot) = watch::channel(CatalogSnapshot::default());
    let (errors_tx, errors) = watch::channel(None);

    let actor = CatalogActor {
        remote,
        store,
        state: CatalogState::default(),
        generation: 0,
        in_flight: None,
        fetched_tx,
        snapshot_tx,
        errors_tx,
    };
    tokio::spawn(actor.run(command_rx, fetched_rx));

    CatalogHandle {
        commands,
        snapshot,
        errors,
    }
}

impl CatalogHandle {
    /// Request the next page (end-of-list trigger).
    pub async fn load_more(&self) -> Result<LoadOutcome, CatalogError> {
        self.request(|reply| Command::LoadMore { reply }).await
    }

    /// Switch view mode, clearing the list and reloading from page 1.
    pub async fn switch_mode(&self, mode: ViewMode) -> Result<LoadOutcome, CatalogError> {
        self.request(|reply| Command::SwitchMode { mode, reply }).await
    }

    /// Clear the list and reload the current mode from page 1.
    pub async fn refresh(&self) -> Result<LoadOutcome, CatalogError> {
        self.request(|reply| Command::Refresh { reply }).await
    }

    /// Flip the persisted favorite status of `id`. Returns the new status.
    pub async fn toggle_favorite(&self, id: CharacterId) -> Result<bool, CatalogError> {
        self.request(|reply| Command::ToggleFavorite { id, reply }).await?
    }

    /// Clear the published error message.
    pub async fn clear_error(&self) -> Result<(), CatalogError> {
        self.send(Command::ClearError).await
    }

    /// Stop the actor. An in-flight load is abandoned.
    pub async fn shutdown(&self) -> Result<(), CatalogError> {
        self.send(Command::Shutdown).await
    }

    /// Latest published state.
    pub fn snapshot(&self) -> CatalogSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Watch the published state.
    pub fn subscribe(&self) -> watch::Receiver<CatalogSnapshot> {
        self.snapshot.clone()
    }

    /// Watch the error channel. `None` means no error is being shown.
    pub fn errors(&self) -> watch::Receiver<Option<String>> {
        self.errors.clone()
    }

    /// Current error message, if any.
    pub fn current_error(&self) -> Option<String> {
        self.errors.borrow().clone()
    }

    pub fn is_refreshing(&self) -> bool {
        self.snapshot.borrow().refreshing
    }

    async fn send(&self, command: Command) -> Result<(), CatalogError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| CatalogError::Closed)
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, CatalogError> {
        let (reply, response) = oneshot::channel();
        self.send(command(reply)).await?;
        response.await.map_err(|_| CatalogError::Closed)
    }
}

struct CatalogActor {
    remote: Arc<dyn RemoteSource>,
    store: Arc<dyn FavoriteStore>,
    state: CatalogState,
    /// Bumped on every mode switch and refresh; fetch results from an older
    /// generation are discarded
    generation: u64,
    in_flight: Option<InFlight>,
    fetched_tx: mpsc::UnboundedSender<Fetched>,
    snapshot_tx: watch::Sender<CatalogSnapshot>,
    errors_tx: watch::Sender<Option<String>>,
}

impl CatalogActor {
    async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        mut fetched: mpsc::UnboundedReceiver<Fetched>,
    ) {
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => self.handle(command).await,
                },
                Some(result) = fetched.recv() => self.finish_fetch(result),
            }
        }

        self.supersede();
        tracing::debug!("Catalog actor stopped");
    }

    async fn handle(&mut self, command: Command) {
        match command {
            Command::LoadMore { reply } => {
                self.load(Trigger::EndOfList, reply).await;
            }
            Command::SwitchMode { mode, reply } => {
                tracing::info!("Switching catalog to {mode:?}");
                self.supersede();
                self.state.refreshing = false;
                self.state.reset(mode);
                self.publish();
                self.load(Trigger::Reload, reply).await;
            }
            Command::Refresh { reply } => {
                tracing::info!("Refreshing catalog ({:?})", self.state.mode);
                self.supersede();
                self.state.refreshing = true;
                self.state.reset(self.state.mode);
                self.publish();
                self.load(Trigger::Reload, reply).await;
            }
            Command::ToggleFavorite { id, reply } => {
                let result = self.toggle_favorite(id).await;
                if let Err(error) = &result {
                    self.publish_error(error.to_string());
                }
                let _ = reply.send(result);
            }
            Command::ClearError => {
                self.errors_tx.send_replace(None);
            }
            Command::Shutdown => {}
        }
    }

    async fn load(&mut self, trigger: Trigger, reply: oneshot::Sender<LoadOutcome>) {
        if self.in_flight.is_some() {
            tracing::debug!("Load already in flight; dropping request");
            let _ = reply.send(LoadOutcome::Busy);
            return;
        }
        if self.state.mode == ViewMode::FavoritesOnly && trigger == Trigger::EndOfList {
            let _ = reply.send(LoadOutcome::NotPaginated);
            return;
        }

        let favorites = match self.store.get_all().await {
            Ok(favorites) => favorites,
            Err(error) => {
                let message = CatalogError::from(error).to_string();
                self.fail_load(message, reply);
                return;
            }
        };

        match self.state.mode {
            ViewMode::FavoritesOnly => {
                let loaded = self.state.show_favorites(&favorites);
                tracing::debug!("Loaded {loaded} favorites");
                self.state.refreshing = false;
                self.publish();
                let _ = reply.send(LoadOutcome::Applied { entries: loaded });
            }
            ViewMode::All => {
                self.state.remember_favorites(&favorites);
                match self.state.cursor {
                    Cursor::End => {
                        self.state.refreshing = false;
                        self.publish();
                        let _ = reply.send(LoadOutcome::Exhausted);
                    }
                    Cursor::Page(page) => self.start_fetch(page, reply),
                }
            }
        }
    }

    fn start_fetch(&mut self, page: u32, reply: oneshot::Sender<LoadOutcome>) {
        let generation = self.generation;
        let remote = Arc::clone(&self.remote);
        let fetched_tx = self.fetched_tx.clone();

        tracing::debug!("Requesting page {page} (generation {generation})");
        // Observers see `loading` before the request can possibly complete
        self.snapshot_tx.send_replace(self.state.snapshot(true));
        let task = tokio::spawn(async move {
            let result = remote
                .fetch_page(page)
                .await
                .and_then(|fetched| fetched.following(page));
            let _ = fetched_tx.send(Fetched { generation, result });
        });

        self.in_flight = Some(InFlight {
            generation,
            task,
            reply,
        });
    }

    fn finish_fetch(&mut self, fetched: Fetched) {
        let Some(in_flight) = self
            .in_flight
            .take_if(|in_flight| in_flight.generation == fetched.generation)
        else {
            tracing::debug!(
                "Discarding page from superseded generation {}",
                fetched.generation
            );
            return;
        };

        match fetched.result {
            Ok(page) => {
                let appended = self.state.append_page(page);
                tracing::debug!(
                    "Appended {appended} characters; cursor now {:?}",
                    self.state.cursor
                );
                self.state.refreshing = false;
                self.publish();
                let _ = in_flight.reply.send(LoadOutcome::Applied { entries: appended });
            }
            Err(error) => self.fail_load(error.to_string(), in_flight.reply),
        }
    }

    fn fail_load(&mut self, message: String, reply: oneshot::Sender<LoadOutcome>) {
        tracing::warn!("Catalog load failed: {message}");
        self.state.refreshing = false;
        self.publish();
        self.publish_error(message.clone());
        let _ = reply.send(LoadOutcome::Failed(message));
    }

    /// Abandon the in-flight load, if any, and start a new generation.
    fn supersede(&mut self) {
        self.generation += 1;
        if let Some(in_flight) = self.in_flight.take() {
            tracing::debug!("Superseding load from generation {}", in_flight.generation);
            in_flight.task.abort();
            let _ = in_flight.reply.send(LoadOutcome::Superseded);
        }
    }

    async fn toggle_favorite(&mut self, id: CharacterId) -> Result<bool, CatalogError> {
        if let Some(existing) = self.store.get_by_id(id).await? {
            self.store.delete(&existing).await?;
            self.state.set_favorite(id, false);
            tracing::debug!("Removed favorite {id}");
            self.publish();
            return Ok(false);
        }

        let record = self
            .state
            .find_character(id)
            .map(FavoriteRecord::from_character)
            .ok_or(CatalogError::UnknownCharacter(id))?;
        self.store.upsert(&record).await?;
        self.state.set_favorite(id, true);
        tracing::debug!("Added favorite {id}");
        self.publish();
        Ok(true)
    }

    fn publish(&self) {
        self.snapshot_tx
            .send_replace(self.state.snapshot(self.in_flight.is_some()));
    }

    fn publish_error(&self, message: String) {
        self.errors_tx.send_replace(Some(message));
    }
}
