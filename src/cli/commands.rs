use clap::{Parser, Subcommand};

use crate::entity::NoteId;

#[derive(Parser, Debug)]
#[command(name = "notekeep")]
#[command(version, about = "Keep short text notes in a local JSON store")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log storage activity to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a notekeep directory here
    Init,

    /// Save a new note
    Add {
        /// Note text
        text: Option<String>,

        /// Read the note text from stdin
        #[arg(long, conflicts_with = "text")]
        stdin: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all notes
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one note
    Show {
        /// Note id
        id: NoteId,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace the text of a note
    Edit {
        /// Note id
        id: NoteId,

        /// New text
        text: Option<String>,

        /// Read the new text from stdin
        #[arg(long, conflicts_with = "text")]
        stdin: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a note
    Delete {
        /// Note id
        id: NoteId,

        /// Skip the confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Delete every note
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Interactive session with an edit cursor and draft
    Session,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from(["notekeep", "add", "buy milk", "--json"]).unwrap();
        match cli.command {
            Commands::Add { text, stdin, json } => {
                assert_eq!(text.as_deref(), Some("buy milk"));
                assert!(!stdin);
                assert!(json);
            }
            other => panic!("Expected Add, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_delete_force() {
        let cli = Cli::try_parse_from(["notekeep", "delete", "1700000000000", "-f"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Delete {
                id: 1700000000000,
                force: true
            }
        ));
    }

    #[test]
    fn test_text_and_stdin_conflict() {
        assert!(Cli::try_parse_from(["notekeep", "add", "x", "--stdin"]).is_err());
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["notekeep", "list", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_id_must_be_numeric() {
        assert!(Cli::try_parse_from(["notekeep", "show", "abc"]).is_err());
    }
}
