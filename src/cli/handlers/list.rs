//! List and recent command handlers.

use anyhow::{Result, bail};

use crate::app::App;
use crate::cli::ListArgs;
use crate::cli::output::{NoteListing, Output, OutputFormat};
use crate::view::RecentNotes;

/// Prints the home view. A failed load still prints whatever was cached
/// before failing the command.
pub fn handle_list(args: &ListArgs, app: &App) -> Result<()> {
    let state = app.store().snapshot();

    match args.format {
        OutputFormat::Human => print!("{}", app.render()?),
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = state.notes.iter().map(NoteListing::from).collect();
            println!("{}", serde_json::to_string_pretty(&Output::new(listings))?);
        }
    }

    if let Some(message) = state.error {
        bail!("{message}");
    }
    Ok(())
}

pub fn handle_recent(app: &App) -> Result<()> {
    let state = app.store().snapshot();
    print!("{}", RecentNotes::render(&state));

    if let Some(message) = state.error {
        bail!("{message}");
    }
    Ok(())
}
