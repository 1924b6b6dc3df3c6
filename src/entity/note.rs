// src/entity/note.rs
use serde::{Deserialize, Serialize};

use super::NoteId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    #[serde(alias = "texto")]
    pub text: String,
    #[serde(alias = "data")]
    pub timestamp: String,
}

impl Note {
    pub fn new(id: NoteId, text: String, timestamp: String) -> Self {
        Self {
            id,
            text,
            timestamp,
        }
    }

    /// Text with the edit stamp refreshed. Id is kept.
    pub fn revised(&self, text: String, timestamp: String) -> Self {
        Self {
            id: self.id,
            text,
            timestamp,
        }
    }
}
