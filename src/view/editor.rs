//! Editor view for new and existing notes, with background AI suggestions.

use std::fmt::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::domain::{DraftError, Note, NoteDraft, NoteId};
use crate::remote::{RemoteError, RemoteStore};
use crate::router::{Navigator, Route};
use crate::store::NotesStore;

/// Content longer than this many characters triggers a suggestion fetch.
pub const SUGGESTION_THRESHOLD: usize = 50;

/// Errors surfaced by editor actions.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    InvalidDraft(#[from] DraftError),

    /// A `note/{id}` location named a note the container does not hold.
    #[error("note not found: {0}")]
    NoteNotFound(NoteId),

    #[error("a note that was never saved cannot be deleted")]
    NotSaved,

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Which note the editor is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    New,
    Existing(NoteId),
}

/// Clears the in-flight flag however the fetch task ends.
struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Background suggestion fetching for one editor.
///
/// At most one fetch is outstanding at a time: content changes that arrive
/// while one is in flight are ignored rather than queued. Dropping the task
/// cancels an outstanding fetch and its response is discarded.
pub struct SuggestionTask {
    remote: Arc<dyn RemoteStore>,
    in_flight: Arc<AtomicBool>,
    latest: Arc<Mutex<Vec<String>>>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl SuggestionTask {
    pub fn new(remote: Arc<dyn RemoteStore>) -> Self {
        Self {
            remote,
            in_flight: Arc::new(AtomicBool::new(false)),
            latest: Arc::new(Mutex::new(Vec::new())),
            cancel: CancellationToken::new(),
            handle: None,
        }
    }

    /// Reacts to a content change. Returns true if a fetch was started.
    ///
    /// Must be called from within a tokio runtime.
    pub fn on_content_change(&mut self, content: &str) -> bool {
        if content.chars().count() <= SUGGESTION_THRESHOLD {
            return false;
        }
        if self.in_flight.swap(true, Ordering::AcqRel) {
            debug!("suggestion fetch already in flight, skipping");
            return false;
        }

        let guard = InFlight(Arc::clone(&self.in_flight));
        let remote = Arc::clone(&self.remote);
        let latest = Arc::clone(&self.latest);
        let cancel = self.cancel.clone();
        let content = content.to_string();

        self.handle = Some(tokio::spawn(async move {
            let _guard = guard;
            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("suggestion fetch cancelled");
                    return;
                }
                result = remote.get_suggestions(&content) => result,
            };
            if cancel.is_cancelled() {
                debug!("discarding suggestions for a closed editor");
                return;
            }
            match result {
                Ok(response) => {
                    debug!(count = response.suggestions.len(), "received suggestions");
                    if let Ok(mut slot) = latest.lock() {
                        *slot = response.suggestions;
                    }
                }
                Err(err) => warn!("Error getting suggestions: {err}"),
            }
        }));
        true
    }

    /// True while a fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Suggestions from the most recent successful fetch.
    pub fn suggestions(&self) -> Vec<String> {
        self.latest.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Waits for the outstanding fetch, if any, to finish.
    pub async fn settle(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(err) = handle.await {
                warn!("suggestion task failed: {err}");
            }
        }
    }

    /// Cancels the outstanding fetch, if any.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Drop for SuggestionTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Clears the saving flag however a submit or delete ends.
struct Saving<'a>(&'a mut bool);

impl<'a> Saving<'a> {
    fn begin(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for Saving<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

/// Form state for creating or editing one note.
pub struct EditorView {
    mode: EditorMode,
    title: String,
    content: String,
    saving: bool,
    suggestions: SuggestionTask,
}

impl EditorView {
    /// Opens the editor for `route`, which must be `New` or `Note(id)`.
    ///
    /// `Note(id)` is resolved against the container's cached notes only; a
    /// miss is reported as [`EditorError::NoteNotFound`] and the caller
    /// decides where to redirect.
    pub fn open(store: &NotesStore, route: Route) -> Result<Self, EditorError> {
        match route {
            Route::Note(id) => Self::edit(store, id),
            _ => Ok(Self::create(store)),
        }
    }

    /// An empty editor for a new note.
    pub fn create(store: &NotesStore) -> Self {
        Self {
            mode: EditorMode::New,
            title: String::new(),
            content: String::new(),
            saving: false,
            suggestions: SuggestionTask::new(store.remote()),
        }
    }

    /// An editor pre-filled from the cached note `id`.
    pub fn edit(store: &NotesStore, id: NoteId) -> Result<Self, EditorError> {
        let NoteDraft { title, content } = store
            .get_note(id)
            .ok_or(EditorError::NoteNotFound(id))?
            .to_draft();
        Ok(Self {
            mode: EditorMode::Existing(id),
            title,
            content,
            saving: false,
            suggestions: SuggestionTask::new(store.remote()),
        })
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn is_new(&self) -> bool {
        self.mode == EditorMode::New
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replaces the content and possibly starts a suggestion fetch.
    ///
    /// Returns true if a fetch was started.
    pub fn set_content(&mut self, content: impl Into<String>) -> bool {
        self.content = content.into();
        self.suggestions.on_content_change(&self.content)
    }

    pub fn suggestions(&self) -> Vec<String> {
        self.suggestions.suggestions()
    }

    pub fn suggestions_loading(&self) -> bool {
        self.suggestions.is_loading()
    }

    /// Waits for an outstanding suggestion fetch to finish.
    pub async fn wait_for_suggestions(&mut self) {
        self.suggestions.settle().await;
    }

    /// Appends suggestion `index` after a blank line. Returns it if it existed.
    pub fn accept_suggestion(&mut self, index: usize) -> Option<String> {
        let suggestion = self.suggestions().into_iter().nth(index)?;
        self.content.push_str("\n\n");
        self.content.push_str(&suggestion);
        Some(suggestion)
    }

    pub fn draft(&self) -> NoteDraft {
        NoteDraft::new(&self.title, &self.content)
    }

    /// Saves the form and navigates home.
    ///
    /// A blank title is rejected before anything is sent. On a remote
    /// failure the form keeps its input and the location is unchanged.
    pub async fn submit(
        &mut self,
        store: &NotesStore,
        nav: &mut Navigator,
    ) -> Result<Note, EditorError> {
        let draft = self.draft();
        draft.validate()?;

        let mode = self.mode;
        let note = {
            let _saving = Saving::begin(&mut self.saving);
            match mode {
                EditorMode::New => store.add_note(&draft).await,
                EditorMode::Existing(id) => store.edit_note(id, &draft).await,
            }
        }?;
        nav.navigate(Route::Home);
        Ok(note)
    }

    /// Deletes the bound note and navigates home.
    pub async fn delete(
        &mut self,
        store: &NotesStore,
        nav: &mut Navigator,
    ) -> Result<(), EditorError> {
        let EditorMode::Existing(id) = self.mode else {
            return Err(EditorError::NotSaved);
        };

        {
            let _saving = Saving::begin(&mut self.saving);
            store.remove_note(id).await
        }?;
        nav.navigate(Route::Home);
        Ok(())
    }

    /// Leaves without saving.
    pub fn cancel(&self, nav: &mut Navigator) {
        self.suggestions.cancel();
        nav.navigate(Route::Home);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let heading = match self.mode {
            EditorMode::New => "Create New Note".to_string(),
            EditorMode::Existing(id) => format!("Edit Note [{}]", id),
        };
        let _ = writeln!(out, "{}", heading);
        if self.saving {
            out.push_str("Saving...\n");
        }
        out.push('\n');

        let _ = writeln!(out, "# {}", self.title);
        out.push('\n');
        if !self.content.is_empty() {
            let _ = writeln!(out, "{}", self.content);
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nAI Suggestions:\n");
            for (i, suggestion) in suggestions.iter().enumerate() {
                let _ = writeln!(out, "  {}. {}", i + 1, suggestion);
            }
        }
        out
    }
}
