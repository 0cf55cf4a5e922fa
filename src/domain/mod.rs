//! Core types: Note, NoteDraft, SearchHit, NoteId

mod note;
mod note_id;

pub use note::{DraftError, Note, NoteDraft, SearchHit};
pub use note_id::{NoteId, ParseNoteIdError};
