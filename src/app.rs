//! One client session: the container, the navigator, and route rendering.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::remote::RemoteStore;
use crate::router::{Navigator, Route};
use crate::store::{NotesStore, log_transitions};
use crate::view::{EditorError, EditorView, NotesList, SearchResults};

/// Wires the container to the router for the lifetime of a session.
pub struct App {
    store: NotesStore,
    nav: Navigator,
    observer: JoinHandle<()>,
}

impl App {
    /// Creates the session and issues the startup load.
    ///
    /// A failed load does not abort the session: the error is recorded in
    /// the container and the views show it.
    pub async fn start(remote: Arc<dyn RemoteStore>) -> Self {
        let store = NotesStore::new(remote);
        let observer = log_transitions(store.subscribe());
        if let Err(err) = store.load().await {
            warn!("startup load failed: {err}");
        }
        Self {
            store,
            nav: Navigator::new(),
            observer,
        }
    }

    pub fn store(&self) -> &NotesStore {
        &self.store
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    /// Moves to `route`.
    ///
    /// A `note/{id}` the container does not hold redirects home, and the
    /// miss is returned as [`EditorError::NoteNotFound`].
    pub fn navigate(&mut self, route: Route) -> Result<(), EditorError> {
        self.nav.navigate(route);
        if let Route::Note(id) = route {
            if self.store.get_note(id).is_none() {
                warn!(%id, "note not found, redirecting home");
                self.nav.navigate(Route::Home);
                return Err(EditorError::NoteNotFound(id));
            }
        }
        Ok(())
    }

    /// Borrows the container and the navigator together, for view actions
    /// that read one and move the other.
    pub fn split(&mut self) -> (&NotesStore, &mut Navigator) {
        (&self.store, &mut self.nav)
    }

    /// Renders whatever view the current location maps to.
    pub fn render(&self) -> Result<String, EditorError> {
        let state = self.store.snapshot();
        match *self.nav.current() {
            Route::Home => Ok(NotesList::render(&state)),
            Route::Search => Ok(SearchResults::render(&state)),
            route @ (Route::New | Route::Note(_)) => {
                Ok(EditorView::open(&self.store, route)?.render())
            }
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.observer.abort();
        let trail: Vec<String> = self.nav.history().iter().map(Route::to_string).collect();
        debug!(trail = %trail.join(" -> "), "session ended");
    }
}
