//! Line-oriented interactive session.
//!
//! One [`NoteManager`] lives for the whole session, so the edit cursor and
//! draft carry over from one command to the next.

use std::io::Write;
use std::str::FromStr;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use super::handlers::{write_note, write_notes};
use crate::entity::NoteId;
use crate::error::Result;
use crate::manager::NoteManager;
use crate::storage::KeyValueStore;

const HELP: &str = "\
Commands:
  save [TEXT]   save TEXT (or the current draft) as a new note, or into the note being edited
  draft TEXT    replace the current draft without saving
  edit ID       start editing a note; its text becomes the draft
  cancel        stop editing and drop the draft
  delete ID     delete a note (asks for confirmation)
  show ID       print one note
  list          print all notes
  reload        re-read notes from storage
  help          show this message
  quit          leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Save(Option<String>),
    Draft(String),
    Edit(NoteId),
    Cancel,
    Delete(NoteId),
    Show(NoteId),
    List,
    Reload,
    Help,
    Quit,
}

fn parse_id(arg: &str) -> std::result::Result<NoteId, String> {
    arg.trim()
        .parse()
        .map_err(|_| format!("Invalid note id: {}", arg.trim()))
}

impl FromStr for SessionCommand {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim_start();
        let (word, rest) = match s.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest),
            None => (s.trim_end(), ""),
        };

        match word.to_lowercase().as_str() {
            "save" | "new" => Ok(SessionCommand::Save(
                Some(rest.to_string()).filter(|r| !r.is_empty()),
            )),
            "draft" => Ok(SessionCommand::Draft(rest.to_string())),
            "edit" => parse_id(rest).map(SessionCommand::Edit),
            "cancel" => Ok(SessionCommand::Cancel),
            "delete" | "rm" => parse_id(rest).map(SessionCommand::Delete),
            "show" => parse_id(rest).map(SessionCommand::Show),
            "list" | "ls" => Ok(SessionCommand::List),
            "reload" => Ok(SessionCommand::Reload),
            "help" | "?" => Ok(SessionCommand::Help),
            "quit" | "exit" | "q" => Ok(SessionCommand::Quit),
            _ => Err(format!("Unknown command: {} (try 'help')", word)),
        }
    }
}

fn prompt<S: KeyValueStore>(manager: &NoteManager<S>) -> String {
    match manager.editing_id() {
        Some(id) => format!("[editing {}]> ", id),
        None => "> ".to_string(),
    }
}

/// Run commands from `input` until it ends or `quit` is read.
///
/// Operation errors are printed and the session carries on.
pub async fn run_session<S, R, W>(
    manager: &mut NoteManager<S>,
    input: R,
    out: &mut W,
) -> Result<()>
where
    S: KeyValueStore,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    write_notes(out, manager.notes())?;
    writeln!(out, "Type 'help' for commands.")?;

    loop {
        write!(out, "{}", prompt(manager))?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "Error: {}", e)?;
                continue;
            }
        };

        match command {
            SessionCommand::Save(text) => {
                let text = text.unwrap_or_else(|| manager.draft().to_string());
                match manager.submit(&text).await {
                    Ok(outcome) => writeln!(out, "{}", outcome.message())?,
                    Err(e) => writeln!(out, "Error: {}", e)?,
                }
            }
            SessionCommand::Draft(text) => manager.set_draft(text),
            SessionCommand::Edit(id) => match manager.begin_edit(id) {
                Some(text) => writeln!(out, "Editing {}: {}", id, text)?,
                None => writeln!(out, "Error: Note not found: {}", id)?,
            },
            SessionCommand::Cancel => {
                manager.cancel_edit();
                writeln!(out, "Edit cancelled.")?;
            }
            SessionCommand::Delete(id) => {
                if manager.get(id).is_none() {
                    writeln!(out, "Error: Note not found: {}", id)?;
                    continue;
                }

                write!(out, "Delete note {}? [y/N] ", id)?;
                out.flush()?;
                let answer = lines.next_line().await?.unwrap_or_default();
                if !answer.trim().eq_ignore_ascii_case("y") {
                    writeln!(out, "Cancelled.")?;
                    continue;
                }

                match manager.remove(id).await {
                    Ok(_) => writeln!(out, "Deleted note {}", id)?,
                    Err(e) => writeln!(out, "Error: {}", e)?,
                }
            }
            SessionCommand::Show(id) => match manager.get(id) {
                Some(note) => write_note(out, note)?,
                None => writeln!(out, "Error: Note not found: {}", id)?,
            },
            SessionCommand::List => write_notes(out, manager.notes())?,
            SessionCommand::Reload => {
                manager.reload().await;
                write_notes(out, manager.notes())?;
            }
            SessionCommand::Help => writeln!(out, "{}", HELP)?,
            SessionCommand::Quit => break,
        }
    }

    Ok(())
}
