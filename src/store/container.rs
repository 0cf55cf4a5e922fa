//! `NotesStore`: the session's single source of truth for note state.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, error, warn};

use super::state::{AppState, Operation};
use crate::domain::{Note, NoteDraft, NoteId, SearchHit};
use crate::remote::{RemoteError, RemoteResult, RemoteStore};

/// Holds `loading` true for as long as it lives.
///
/// Dropping clears the flag, which covers success, failure and a future that
/// is dropped mid-await alike.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<AppState>,
}

impl<'a> LoadingGuard<'a> {
    fn begin(state: &'a watch::Sender<AppState>) -> Self {
        state.send_modify(|s| s.loading = true);
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.loading = false);
    }
}

/// Session-lifetime cache of the remote note collection.
///
/// All note mutations go through the async methods here, and each one only
/// touches local state after the server has confirmed the change. Views read
/// through [`NotesStore::state`] / [`NotesStore::snapshot`] and can follow
/// changes with [`NotesStore::subscribe`].
///
/// Concurrent calls are not queued: two overlapping operations each toggle
/// `loading`, and the last one to settle wins.
pub struct NotesStore {
    remote: Arc<dyn RemoteStore>,
    state: watch::Sender<AppState>,
}

impl NotesStore {
    /// Creates an empty, idle container. Call [`NotesStore::load`] next.
    pub fn new(remote: Arc<dyn RemoteStore>) -> Self {
        let (state, _) = watch::channel(AppState::default());
        Self { remote, state }
    }

    /// The remote store this container talks to.
    ///
    /// Views use it directly for the AI endpoints, which do not touch
    /// container state.
    pub fn remote(&self) -> Arc<dyn RemoteStore> {
        Arc::clone(&self.remote)
    }

    /// Borrows the current state.
    ///
    /// Do not hold the returned guard across an `.await` on this store.
    pub fn state(&self) -> watch::Ref<'_, AppState> {
        self.state.borrow()
    }

    /// Clones the current state.
    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }

    /// Looks up a note in the cached collection. Never fetches.
    pub fn get_note(&self, id: NoteId) -> Option<Note> {
        self.state.borrow().note(id).cloned()
    }

    /// Fetches the full collection.
    ///
    /// On failure the previously cached notes stay visible and the error is
    /// recorded; stale-but-available beats a blank list.
    pub async fn load(&self) -> RemoteResult<()> {
        let _loading = LoadingGuard::begin(&self.state);
        match self.remote.list_notes().await {
            Ok(notes) => {
                let notes = dedup_by_id(notes);
                debug!(count = notes.len(), "loaded notes");
                self.state.send_modify(|s| {
                    s.notes = notes;
                    s.error = None;
                });
                Ok(())
            }
            Err(err) => Err(self.record_failure(Operation::Load, err)),
        }
    }

    /// Creates a note and appends the server's representation.
    pub async fn add_note(&self, draft: &NoteDraft) -> RemoteResult<Note> {
        let _loading = LoadingGuard::begin(&self.state);
        match self.remote.create_note(draft).await {
            Ok(note) => {
                debug!(id = %note.id(), "created note");
                let stored = note.clone();
                self.state.send_modify(|s| {
                    match s.notes.iter_mut().find(|n| n.id() == stored.id()) {
                        Some(slot) => {
                            warn!(id = %stored.id(), "server returned an id already cached");
                            *slot = stored;
                        }
                        None => s.notes.push(stored),
                    }
                });
                Ok(note)
            }
            Err(err) => Err(self.record_failure(Operation::Create, err)),
        }
    }

    /// Replaces a note and swaps in the server's representation.
    ///
    /// The cached entry is replaced whole, so fields the server normalized
    /// differ from the submitted draft afterwards.
    pub async fn edit_note(&self, id: NoteId, draft: &NoteDraft) -> RemoteResult<Note> {
        let _loading = LoadingGuard::begin(&self.state);
        match self.remote.update_note(id, draft).await {
            Ok(note) => {
                debug!(%id, "updated note");
                let stored = note.clone();
                self.state.send_modify(|s| {
                    if let Some(slot) = s.notes.iter_mut().find(|n| n.id() == id) {
                        *slot = stored;
                    }
                });
                Ok(note)
            }
            Err(err) => Err(self.record_failure(Operation::Update, err)),
        }
    }

    /// Deletes a note and drops it from the cache.
    pub async fn remove_note(&self, id: NoteId) -> RemoteResult<()> {
        let _loading = LoadingGuard::begin(&self.state);
        match self.remote.delete_note(id).await {
            Ok(()) => {
                debug!(%id, "deleted note");
                self.state.send_modify(|s| s.notes.retain(|n| n.id() != id));
                Ok(())
            }
            Err(err) => Err(self.record_failure(Operation::Delete, err)),
        }
    }

    /// Runs a ranked search and replaces the stored results.
    ///
    /// The cached collection is never touched.
    pub async fn search(&self, query: &str) -> RemoteResult<Vec<SearchHit>> {
        let _loading = LoadingGuard::begin(&self.state);
        match self.remote.search_notes(query).await {
            Ok(results) => {
                debug!(query, count = results.len(), "search finished");
                let stored = results.clone();
                self.state.send_modify(|s| s.search_results = stored);
                Ok(results)
            }
            Err(err) => Err(self.record_failure(Operation::Search, err)),
        }
    }

    fn record_failure(&self, operation: Operation, err: RemoteError) -> RemoteError {
        error!(
            operation = operation.as_str(),
            transport = err.is_transport(),
            "{}: {err}",
            operation.failure_message()
        );
        self.state
            .send_modify(|s| s.error = Some(operation.failure_message().to_string()));
        err
    }
}

fn dedup_by_id(notes: Vec<Note>) -> Vec<Note> {
    let mut seen = HashSet::with_capacity(notes.len());
    let before = notes.len();
    let unique: Vec<Note> = notes.into_iter().filter(|n| seen.insert(n.id())).collect();
    if unique.len() != before {
        warn!(dropped = before - unique.len(), "server list contained duplicate ids");
    }
    unique
}
