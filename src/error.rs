use thiserror::Error;

use crate::entity::NoteId;

#[derive(Error, Debug)]
pub enum NotekeepError {
    #[error("Note cannot be empty.")]
    EmptyNote,

    #[error("Could not read notes: {0}")]
    StorageRead(String),

    #[error("Could not write notes: {0}")]
    StorageWrite(String),

    #[error("Note not found: {0}")]
    NoteNotFound(NoteId),

    #[error("Not in a notekeep project. Run 'notekeep init' first.")]
    NotInitialized,

    #[error("Already initialized. Remove .notekeep/ to reinitialize.")]
    AlreadyInitialized,

    #[error("Use --force to delete in non-interactive mode")]
    ConfirmationRequired,

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NotekeepError {
    /// True for errors caused by user input rather than storage.
    pub fn is_validation(&self) -> bool {
        matches!(self, NotekeepError::EmptyNote | NotekeepError::NoteNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, NotekeepError>;
