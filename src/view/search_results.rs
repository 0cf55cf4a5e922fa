//! Search results view.

use std::fmt::Write;

use crate::domain::NoteId;
use crate::router::{Navigator, Route};
use crate::store::AppState;

const CONTENT_LIMIT: usize = 200;

/// Renders the container's last search results.
pub struct SearchResults;

impl SearchResults {
    pub fn render(state: &AppState) -> String {
        if state.loading {
            return "Searching...\n".to_string();
        }

        let mut out = String::new();
        if let Some(error) = &state.error {
            let _ = writeln!(out, "! {}", error);
            out.push('\n');
        }

        if state.search_results.is_empty() {
            out.push_str("No Results Found\n");
            out.push_str("Try a different search term or create a new note\n");
            return out;
        }

        let _ = writeln!(
            out,
            "Search Results ({} results found)\n",
            state.search_results.len()
        );
        for hit in &state.search_results {
            let note = hit.note();
            let _ = writeln!(out, "[{}] {}", note.id(), note.title());
            let content = truncate_content(note.content());
            if !content.is_empty() {
                let _ = writeln!(out, "    {}", content);
            }
            if let Some(percent) = hit.relevance_percent() {
                let _ = writeln!(out, "    Relevance: {}%", percent);
            }
        }
        out
    }

    /// Selecting a result opens its editor.
    pub fn open(nav: &mut Navigator, id: NoteId) {
        nav.navigate(Route::Note(id));
    }
}

/// Cuts content to 200 characters, marking the cut with `...`.
fn truncate_content(content: &str) -> String {
    if content.chars().count() > CONTENT_LIMIT {
        let head: String = content.chars().take(CONTENT_LIMIT).collect();
        format!("{}...", head)
    } else {
        content.to_string()
    }
}
