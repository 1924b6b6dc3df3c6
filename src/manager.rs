//! In-memory note list kept in step with a [`NoteStore`].
//!
//! Every mutation is a whole-collection read-modify-write. The in-memory
//! list only changes after the store has accepted the new collection, so a
//! failed write leaves the list, the edit cursor and the draft untouched.
//!
//! Methods that touch storage take `&mut self`, so one manager runs one
//! operation at a time. Separate managers over the same store are not
//! coordinated and can lose each other's updates.

use crate::clock::{Clock, SystemClock};
use crate::entity::{
    format_timestamp, next_note_id, Collection, Note, NoteId, DEFAULT_TIMESTAMP_FORMAT,
};
use crate::error::{NotekeepError, Result};
use crate::storage::{KeyValueStore, NoteStore};

/// Whether a save creates a note or rewrites an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Idle,
    Editing(NoteId),
}

/// Result of a successful [`NoteManager::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(Note),
    /// `None` when the edited note had already disappeared from storage.
    Updated(Option<Note>),
}

impl SubmitOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            SubmitOutcome::Created(_) => "Note saved!",
            SubmitOutcome::Updated(_) => "Note updated!",
        }
    }

    pub fn note(&self) -> Option<&Note> {
        match self {
            SubmitOutcome::Created(note) => Some(note),
            SubmitOutcome::Updated(note) => note.as_ref(),
        }
    }
}

pub struct NoteManager<S> {
    store: NoteStore<S>,
    clock: Box<dyn Clock>,
    timestamp_format: String,
    notes: Collection,
    edit: EditState,
    draft: String,
    last_issued: Option<NoteId>,
}

impl<S: KeyValueStore> NoteManager<S> {
    /// A manager with an empty list. Call [`reload`](Self::reload) to fetch
    /// what is stored.
    pub fn new(store: NoteStore<S>) -> Self {
        Self {
            store,
            clock: Box::new(SystemClock),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            notes: Vec::new(),
            edit: EditState::Idle,
            draft: String::new(),
            last_issued: None,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    pub fn store(&self) -> &NoteStore<S> {
        &self.store
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn edit_state(&self) -> EditState {
        self.edit
    }

    pub fn editing_id(&self) -> Option<NoteId> {
        match self.edit {
            EditState::Editing(id) => Some(id),
            EditState::Idle => None,
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Replace the in-memory list with whatever the store holds. Read
    /// faults leave an empty list.
    pub async fn reload(&mut self) {
        self.notes = self.store.load().await;
        tracing::debug!(count = self.notes.len(), "reloaded notes");
    }

    /// Save `draft_text`: rewrite the note under edit, or append a new one.
    ///
    /// Blank text is rejected before any storage access and leaves the draft
    /// alone. On any other error the list and edit cursor are unchanged and
    /// the draft keeps `draft_text`.
    pub async fn submit(&mut self, draft_text: &str) -> Result<SubmitOutcome> {
        if draft_text.trim().is_empty() {
            return Err(NotekeepError::EmptyNote);
        }
        self.draft = draft_text.to_string();

        let mut current = self.store.try_load().await?;
        let now = self.clock.now();
        let timestamp = format_timestamp(now, &self.timestamp_format)?;

        match self.edit {
            EditState::Editing(id) => {
                let mut updated = None;
                for note in current.iter_mut() {
                    if note.id == id {
                        *note = note.revised(draft_text.to_string(), timestamp.clone());
                        updated = Some(note.clone());
                    }
                }
                if updated.is_none() {
                    tracing::warn!(id, "edited note no longer in storage");
                }

                self.store.save(&current).await?;

                self.notes = current;
                self.edit = EditState::Idle;
                self.draft.clear();
                tracing::info!(id, "updated note");
                Ok(SubmitOutcome::Updated(updated))
            }
            EditState::Idle => {
                let id = next_note_id(now.timestamp_millis(), self.last_issued, &current)?;
                let note = Note::new(id, draft_text.to_string(), timestamp);
                current.push(note.clone());

                self.store.save(&current).await?;

                self.notes = current;
                self.last_issued = Some(id);
                self.draft.clear();
                tracing::info!(id, "created note");
                Ok(SubmitOutcome::Created(note))
            }
        }
    }

    /// Start editing `id`, seeding the draft with its text. Returns `None`
    /// and changes nothing if the note is not in the list.
    pub fn begin_edit(&mut self, id: NoteId) -> Option<String> {
        let text = self.get(id)?.text.clone();
        self.edit = EditState::Editing(id);
        self.draft = text.clone();
        Some(text)
    }

    /// Leave edit mode and drop the draft. Does nothing when idle.
    pub fn cancel_edit(&mut self) {
        if self.edit != EditState::Idle {
            self.edit = EditState::Idle;
            self.draft.clear();
        }
    }

    /// Delete `id` from the list and persist the result.
    ///
    /// The caller is expected to have confirmed with the user. Works from the
    /// in-memory list; an unknown id persists the list unchanged and returns
    /// `Ok(None)`.
    pub async fn remove(&mut self, id: NoteId) -> Result<Option<Note>> {
        let removed = self.get(id).cloned();
        let remaining: Collection = self.notes.iter().filter(|n| n.id != id).cloned().collect();

        self.store.save(&remaining).await?;

        self.notes = remaining;
        if self.edit == EditState::Editing(id) {
            self.edit = EditState::Idle;
            self.draft.clear();
        }
        if removed.is_some() {
            tracing::info!(id, "deleted note");
        }
        Ok(removed)
    }
}
