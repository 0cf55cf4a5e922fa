//! Logs container state transitions for `-vv` sessions.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use super::AppState;

/// Spawns a task that logs each change of `loading`, `error` and the note
/// count. The task ends when the container is dropped.
pub fn log_transitions(mut rx: watch::Receiver<AppState>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut last = Summary::of(&rx.borrow_and_update());
        while rx.changed().await.is_ok() {
            let current = Summary::of(&rx.borrow_and_update());
            if current != last {
                debug!(
                    loading = current.loading,
                    error = current.error.as_deref().unwrap_or("-"),
                    notes = current.notes,
                    results = current.results,
                    "state changed"
                );
                last = current;
            }
        }
    })
}

#[derive(Debug, PartialEq)]
struct Summary {
    loading: bool,
    error: Option<String>,
    notes: usize,
    results: usize,
}

impl Summary {
    fn of(state: &AppState) -> Self {
        Self {
            loading: state.loading,
            error: state.error.clone(),
            notes: state.notes.len(),
            results: state.search_results.len(),
        }
    }
}
