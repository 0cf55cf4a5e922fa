//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod logging;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

use crate::domain::NoteId;
use crate::router::Route;
use output::OutputFormat;

/// notes - terminal client for the AI notes service
#[derive(Parser, Debug)]
#[command(name = "notes", version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the notes API (overrides env and config file)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all notes
    #[command(name = "ls")]
    List(ListArgs),

    /// Show a note
    Show(ShowArgs),

    /// Create a new note
    New(NewArgs),

    /// Edit an existing note
    Edit(EditArgs),

    /// Delete a note
    Rm(RmArgs),

    /// Search notes by meaning
    Search(SearchArgs),

    /// Show the most recent notes
    Recent,

    /// Ask a question about your notes
    Ask(AskArgs),

    /// Render a location (/, /new, /search, /note/<id>)
    Open(OpenArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `ls` command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Note ID
    pub id: NoteId,
}

/// Arguments for the `new` command
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Note title
    pub title: String,

    /// Note content
    #[arg(short, long, conflicts_with = "stdin")]
    pub content: Option<String>,

    /// Read note content from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Wait for AI suggestions and print them before saving
    #[arg(short, long)]
    pub suggest: bool,

    /// Append suggestion N (1-based) to the content before saving
    #[arg(long, value_name = "N", requires = "suggest")]
    pub accept: Option<usize>,
}

/// Arguments for the `edit` command
#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Note ID
    pub id: NoteId,

    /// New title
    #[arg(short, long)]
    pub title: Option<String>,

    /// New content (replaces the existing content)
    #[arg(short, long, conflicts_with = "stdin")]
    pub content: Option<String>,

    /// Read new content from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Wait for AI suggestions and print them before saving
    #[arg(short, long)]
    pub suggest: bool,

    /// Append suggestion N (1-based) to the content before saving
    #[arg(long, value_name = "N", requires = "suggest")]
    pub accept: Option<usize>,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct RmArgs {
    /// Note ID
    pub id: NoteId,
}

/// Arguments for the `search` command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Search query
    pub query: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `ask` command
#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The question
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,
}

/// Arguments for the `open` command
#[derive(Parser, Debug)]
pub struct OpenArgs {
    /// Location path
    pub location: Route,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
