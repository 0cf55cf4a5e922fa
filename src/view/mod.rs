//! Views: pure renderers of container state plus local input state.
//!
//! Each view turns [`crate::store::AppState`] (and, for the editor and
//! sidebar, its own input fields) into terminal text, and turns user actions
//! into container calls followed by navigation.

mod editor;
mod list;
mod search_box;
mod search_results;
mod sidebar;

pub use editor::{EditorError, EditorMode, EditorView, SUGGESTION_THRESHOLD, SuggestionTask};
pub use list::NotesList;
pub use search_box::SearchBox;
pub use search_results::SearchResults;
pub use sidebar::{ASK_FAILURE, AskPanel, RecentNotes};

use chrono::{DateTime, Utc};

/// Formats a timestamp the way note cards show it, e.g. `Jan 15, 2024`.
pub(crate) fn format_date(dt: DateTime<Utc>) -> String {
    dt.format("%b %-d, %Y").to_string()
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

/// Collapses runs of whitespace (including newlines) into single spaces.
pub(crate) fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
