//! Application state shape and the operations that mutate it.

use crate::domain::{Note, NoteId, SearchHit};

/// Snapshot of everything the views render from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Full known collection, in server order (creations append).
    pub notes: Vec<Note>,
    /// True while a container operation is in flight.
    pub loading: bool,
    /// Message describing the most recent failure.
    pub error: Option<String>,
    /// Results of the last search, replaced wholesale by each search.
    pub search_results: Vec<SearchHit>,
}

impl AppState {
    /// Looks a note up by id.
    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id() == id)
    }

    /// The first `n` notes in collection order.
    pub fn recent(&self, n: usize) -> &[Note] {
        &self.notes[..self.notes.len().min(n)]
    }
}

/// Container operations that can fail, each with its fixed user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Create,
    Update,
    Delete,
    Search,
}

impl Operation {
    /// Message recorded in [`AppState::error`] when this operation fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Load => "Failed to load notes. Please try again later.",
            Self::Create => "Failed to create note. Please try again.",
            Self::Update => "Failed to update note. Please try again.",
            Self::Delete => "Failed to delete note. Please try again.",
            Self::Search => "Failed to search notes. Please try again.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Search => "search",
        }
    }
}
