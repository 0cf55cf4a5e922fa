//! Search command handler.

use anyhow::{Result, bail};

use crate::app::App;
use crate::cli::SearchArgs;
use crate::cli::output::{Output, OutputFormat, SearchListing};
use crate::view::{SearchBox, SearchResults};

pub async fn handle_search(args: &SearchArgs, app: &mut App) -> Result<()> {
    let search = SearchBox::new(&args.query);
    let (store, nav) = app.split();

    let failed = match search.submit(store, nav).await {
        Ok(true) => false,
        Ok(false) => bail!("search query must not be empty"),
        Err(_) => true,
    };

    // A failure leaves the user-facing message in the container; show it the
    // way the results view would before failing the command.
    let state = app.store().snapshot();
    match args.format {
        OutputFormat::Human if failed => print!("{}", SearchResults::render(&state)),
        OutputFormat::Human => print!("{}", app.render()?),
        OutputFormat::Json => {
            let listings: Vec<SearchListing> =
                state.search_results.iter().map(SearchListing::from).collect();
            println!("{}", serde_json::to_string_pretty(&Output::new(listings))?);
        }
    }

    if failed {
        bail!("{}", state.error.unwrap_or_default());
    }
    Ok(())
}
