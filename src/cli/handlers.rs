use std::env;
use std::io::Write;

use tokio::io::{self, AsyncBufReadExt, AsyncReadExt, BufReader};

use crate::config::Project;
use crate::entity::{Note, NoteId};
use crate::error::{NotekeepError, Result};
use crate::manager::SubmitOutcome;

/// Print a note list the way `list` and the session do.
pub(crate) fn write_notes(out: &mut impl Write, notes: &[Note]) -> std::io::Result<()> {
    if notes.is_empty() {
        writeln!(out, "No notes saved yet...")?;
        return Ok(());
    }

    writeln!(out, "Notes (Total: {}):\n", notes.len())?;
    for note in notes {
        write_note(out, note)?;
    }
    Ok(())
}

pub(crate) fn write_note(out: &mut impl Write, note: &Note) -> std::io::Result<()> {
    writeln!(out, "  [{}] {}", note.id, note.timestamp)?;
    for line in note.text.lines() {
        writeln!(out, "      {}", line)?;
    }
    Ok(())
}

fn print_outcome(outcome: &SubmitOutcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.note())?);
    } else {
        match outcome.note() {
            Some(note) => println!("{} [{}]", outcome.message(), note.id),
            None => println!("{}", outcome.message()),
        }
    }
    Ok(())
}

async fn read_text(text: Option<String>, stdin: bool) -> Result<String> {
    if stdin {
        let mut content = String::new();
        io::stdin().read_to_string(&mut content).await?;
        return Ok(content);
    }
    Ok(text.unwrap_or_default())
}

/// Ask a y/N question on the terminal. Non-interactive stdin is refused.
async fn confirm(question: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        return Err(NotekeepError::ConfirmationRequired);
    }

    eprint!("{} [y/N] ", question);
    let mut input = String::new();
    BufReader::new(io::stdin()).read_line(&mut input).await?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

pub async fn handle_init() -> Result<()> {
    let root = env::current_dir()?;
    let project = Project::init(&root)?;
    println!("Initialized notekeep in {}", project.dir().display());
    Ok(())
}

pub async fn handle_add(text: Option<String>, stdin: bool, json: bool) -> Result<()> {
    let project = Project::discover()?;
    let text = read_text(text, stdin).await?;

    let mut manager = project.manager();
    let outcome = manager.submit(&text).await?;
    print_outcome(&outcome, json)
}

pub async fn handle_list(json: bool) -> Result<()> {
    let project = Project::discover()?;
    let mut manager = project.manager();
    manager.reload().await;

    if json {
        println!("{}", serde_json::to_string_pretty(manager.notes())?);
    } else {
        write_notes(&mut std::io::stdout(), manager.notes())?;
    }
    Ok(())
}

pub async fn handle_show(id: NoteId, json: bool) -> Result<()> {
    let project = Project::discover()?;
    let mut manager = project.manager();
    manager.reload().await;

    let note = manager.get(id).ok_or(NotekeepError::NoteNotFound(id))?;
    if json {
        println!("{}", serde_json::to_string_pretty(note)?);
    } else {
        write_note(&mut std::io::stdout(), note)?;
    }
    Ok(())
}

pub async fn handle_edit(id: NoteId, text: Option<String>, stdin: bool, json: bool) -> Result<()> {
    let project = Project::discover()?;
    let text = read_text(text, stdin).await?;

    let mut manager = project.manager();
    manager.reload().await;
    manager
        .begin_edit(id)
        .ok_or(NotekeepError::NoteNotFound(id))?;

    let outcome = manager.submit(&text).await?;
    print_outcome(&outcome, json)
}

pub async fn handle_delete(id: NoteId, force: bool) -> Result<()> {
    let project = Project::discover()?;
    let mut manager = project.manager();
    manager.reload().await;

    let note = manager
        .get(id)
        .cloned()
        .ok_or(NotekeepError::NoteNotFound(id))?;

    if !force {
        let preview = note.text.lines().next().unwrap_or_default();
        if !confirm(&format!("Delete note {} ({})?", note.id, preview)).await? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    manager.remove(id).await?;
    println!("Deleted note {}", id);
    Ok(())
}

pub async fn handle_clear(force: bool) -> Result<()> {
    let project = Project::discover()?;
    let manager = project.manager();

    if !force && !confirm("Delete every note?").await? {
        println!("Cancelled.");
        return Ok(());
    }

    manager.store().clear().await?;
    println!("All notes deleted.");
    Ok(())
}

pub async fn handle_session() -> Result<()> {
    let project = Project::discover()?;
    let mut manager = project.manager();
    manager.reload().await;

    let input = BufReader::new(io::stdin());
    super::session::run_session(&mut manager, input, &mut std::io::stdout()).await
}
