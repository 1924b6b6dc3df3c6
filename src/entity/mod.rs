mod note;

pub use note::Note;

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};

use crate::error::{NotekeepError, Result};

/// Notes are keyed by a millisecond clock value.
pub type NoteId = i64;

/// The whole persisted unit: notes in insertion order.
pub type Collection = Vec<Note>;

/// `dd/mm/yyyy, hh:mm:ss`
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// Reject chrono format strings containing unknown specifiers.
pub fn validate_timestamp_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(NotekeepError::Config(format!(
            "invalid timestamp format: {:?}",
            format
        )));
    }
    Ok(())
}

/// Format a moment in local time for display.
pub fn format_timestamp(at: DateTime<Utc>, format: &str) -> Result<String> {
    let mut out = String::new();
    write!(out, "{}", at.with_timezone(&Local).format(format)).map_err(|_| {
        NotekeepError::Config(format!("invalid timestamp format: {:?}", format))
    })?;
    Ok(out)
}

/// Pick an id that is at least the clock value and greater than every id
/// already issued or stored.
pub fn next_note_id(
    now_millis: i64,
    last_issued: Option<NoteId>,
    existing: &[Note],
) -> Result<NoteId> {
    let floor = match existing.iter().map(|n| n.id).chain(last_issued).max() {
        Some(max) => max.checked_add(1).ok_or_else(|| {
            NotekeepError::StorageRead(format!("note id {} leaves no room for a new id", max))
        })?,
        None => i64::MIN,
    };

    Ok(now_millis.max(floor))
}
