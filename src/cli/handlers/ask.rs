//! Ask command handler.

use anyhow::{Result, bail};

use crate::app::App;
use crate::cli::AskArgs;
use crate::view::{ASK_FAILURE, AskPanel};

pub async fn handle_ask(args: &AskArgs, app: &App) -> Result<()> {
    let mut panel = AskPanel::new(args.question.join(" "));
    if !panel.ask(app.store().remote().as_ref()).await {
        bail!("question must not be empty");
    }

    print!("{}", panel.render());
    if panel.answer() == Some(ASK_FAILURE) {
        bail!("the assistant could not answer");
    }
    Ok(())
}
