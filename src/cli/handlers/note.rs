//! Show, new, edit and rm command handlers.

use anyhow::Result;
use tracing::info;

use super::{apply_suggestions, ensure_loaded, read_content};
use crate::app::App;
use crate::cli::{EditArgs, NewArgs, RmArgs, ShowArgs};
use crate::router::Route;
use crate::view::EditorView;

pub fn handle_show(args: &ShowArgs, app: &mut App) -> Result<()> {
    ensure_loaded(app)?;
    let routed = app.navigate(Route::Note(args.id));
    print!("{}", app.render()?);
    Ok(routed?)
}

pub async fn handle_new(args: &NewArgs, app: &mut App) -> Result<()> {
    let content = read_content(args.content.as_deref(), args.stdin, std::io::stdin())?;

    let (store, nav) = app.split();
    nav.navigate(Route::New);
    let mut editor = EditorView::create(store);
    editor.set_title(&args.title);
    if let Some(content) = content {
        editor.set_content(content);
    }
    if args.suggest {
        apply_suggestions(&mut editor, args.accept).await?;
    }

    let note = editor.submit(store, nav).await?;
    info!(id = %note.id(), "note created");
    println!("Created note [{}] {}", note.id(), note.title());
    println!();
    print!("{}", app.render()?);
    Ok(())
}

pub async fn handle_edit(args: &EditArgs, app: &mut App) -> Result<()> {
    ensure_loaded(app)?;
    let content = read_content(args.content.as_deref(), args.stdin, std::io::stdin())?;

    app.navigate(Route::Note(args.id))?;
    let (store, nav) = app.split();
    let mut editor = EditorView::edit(store, args.id)?;
    if let Some(title) = &args.title {
        editor.set_title(title);
    }
    if let Some(content) = content {
        editor.set_content(content);
    }
    if args.suggest {
        apply_suggestions(&mut editor, args.accept).await?;
    }

    let note = editor.submit(store, nav).await?;
    info!(id = %note.id(), "note updated");
    println!("Updated note [{}] {}", note.id(), note.title());
    println!();
    print!("{}", app.render()?);
    Ok(())
}

pub async fn handle_rm(args: &RmArgs, app: &mut App) -> Result<()> {
    ensure_loaded(app)?;

    app.navigate(Route::Note(args.id))?;
    let (store, nav) = app.split();
    let mut editor = EditorView::edit(store, args.id)?;
    let title = editor.title().to_string();
    editor.delete(store, nav).await?;

    info!(id = %args.id, "note deleted");
    println!("Deleted note [{}] {}", args.id, title);
    println!();
    print!("{}", app.render()?);
    Ok(())
}
