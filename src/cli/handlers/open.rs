//! Open command handler: render an arbitrary location.

use anyhow::Result;

use super::ensure_loaded;
use crate::app::App;
use crate::cli::OpenArgs;
use crate::router::Route;

pub fn handle_open(args: &OpenArgs, app: &mut App) -> Result<()> {
    if let Route::Note(_) = args.location {
        ensure_loaded(app)?;
    }
    let routed = app.navigate(args.location);
    print!("{}", app.render()?);
    Ok(routed?)
}
