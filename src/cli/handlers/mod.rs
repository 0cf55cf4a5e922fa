//! Command handlers for the CLI.
//!
//! Every handler runs against an [`App`] whose startup load has already
//! happened, drives one view action, and prints what the view renders.

mod ask;
mod list;
mod note;
mod open;
mod search;


use anyhow::{Result, bail};
use std::io::Read;

use crate::app::App;
use crate::view::EditorView;

pub use ask::handle_ask;
pub use list::{handle_list, handle_recent};
pub use note::{handle_edit, handle_new, handle_rm, handle_show};
pub use open::handle_open;
pub use search::handle_search;

// ===========================================
// Shared Utilities
// ===========================================

/// Fails with the container's error message, if the startup load left one.
///
/// Commands that address a note by id need the cached list; without it a
/// missing id would be misreported as "not found".
pub(crate) fn ensure_loaded(app: &App) -> Result<()> {
    if let Some(message) = &app.store().state().error {
        bail!("{message}");
    }
    Ok(())
}

/// Picks note content from `--content`, stdin, or neither.
pub(crate) fn read_content<R: Read>(
    inline: Option<&str>,
    from_stdin: bool,
    mut reader: R,
) -> Result<Option<String>> {
    if let Some(content) = inline {
        return Ok(Some(content.to_string()));
    }
    if from_stdin {
        let mut buf = String::new();
        reader.read_to_string(&mut buf)?;
        return Ok(Some(buf.trim_end_matches('\n').to_string()));
    }
    Ok(None)
}

/// Waits for suggestions, prints them, and appends the `accept`ed one.
///
/// `accept` is 1-based as shown in the listing.
pub(crate) async fn apply_suggestions(editor: &mut EditorView, accept: Option<usize>) -> Result<()> {
    editor.wait_for_suggestions().await;
    let suggestions = editor.suggestions();

    if suggestions.is_empty() {
        eprintln!("No suggestions available.");
    } else {
        println!("AI Suggestions:");
        for (i, suggestion) in suggestions.iter().enumerate() {
            println!("  {}. {}", i + 1, suggestion);
        }
        println!();
    }

    if let Some(n) = accept {
        let picked = n.checked_sub(1).and_then(|i| editor.accept_suggestion(i));
        if picked.is_none() {
            bail!(
                "no suggestion #{} (have {})",
                n,
                editor.suggestions().len()
            );
        }
    }
    Ok(())
}
