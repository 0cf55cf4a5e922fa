//! ainotes - terminal client for an AI-assisted notes service

pub mod app;
pub mod cli;
pub mod domain;
pub mod remote;
pub mod router;
pub mod store;
pub mod view;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::debug;

use app::App;
use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_ask, handle_edit, handle_list, handle_new, handle_open, handle_recent, handle_rm,
        handle_search, handle_show,
    },
    logging,
};
use remote::HttpRemoteStore;

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Command::Completions(args) = &cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(args.shell, &mut cmd, "notes", &mut std::io::stdout());
        return Ok(());
    }

    logging::init(cli.verbose);
    let config = Config::load()?;
    let api_url = config.api_url(cli.api_url.as_deref());
    debug!(%api_url, "resolved api url");
    let remote = HttpRemoteStore::new(&api_url)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(session(cli.command, Arc::new(remote)))
}

async fn session(command: Command, remote: Arc<HttpRemoteStore>) -> Result<()> {
    let mut app = App::start(remote).await;

    match &command {
        Command::List(args) => handle_list(args, &app),
        Command::Show(args) => handle_show(args, &mut app),
        Command::New(args) => handle_new(args, &mut app).await,
        Command::Edit(args) => handle_edit(args, &mut app).await,
        Command::Rm(args) => handle_rm(args, &mut app).await,
        Command::Search(args) => handle_search(args, &mut app).await,
        Command::Recent => handle_recent(&app),
        Command::Ask(args) => handle_ask(args, &app).await,
        Command::Open(args) => handle_open(args, &mut app),
        Command::Completions(_) => Ok(()),
    }
}
