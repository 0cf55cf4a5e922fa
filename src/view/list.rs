//! Home view: the grid of note cards.

use std::fmt::Write;

use super::{format_date, single_line, truncate_str};
use crate::domain::NoteId;
use crate::router::{Navigator, Route};
use crate::store::AppState;

const PREVIEW_WIDTH: usize = 72;

/// Renders the full note collection.
pub struct NotesList;

impl NotesList {
    pub fn render(state: &AppState) -> String {
        if state.loading {
            return "Loading notes...\n".to_string();
        }

        let mut out = String::new();
        if let Some(error) = &state.error {
            let _ = writeln!(out, "! {}", error);
            out.push('\n');
        }

        if state.notes.is_empty() {
            out.push_str("No Notes Yet\n");
            out.push_str("Create your first note to get started (notes new <title>)\n");
            return out;
        }

        out.push_str("Your Notes\n\n");
        for note in &state.notes {
            let _ = write!(out, "[{}] {}", note.id(), note.title());
            if let Some(touched) = note.last_touched() {
                let _ = write!(out, "  {}", format_date(touched));
            }
            out.push('\n');
            let preview = single_line(note.content());
            if !preview.is_empty() {
                let _ = writeln!(out, "    {}", truncate_str(&preview, PREVIEW_WIDTH));
            }
        }
        out
    }

    /// Selecting a card opens its editor.
    pub fn open(nav: &mut Navigator, id: NoteId) {
        nav.navigate(Route::Note(id));
    }

    /// The empty-state button.
    pub fn create(nav: &mut Navigator) {
        nav.navigate(Route::New);
    }
}
