pub mod cli;
pub mod clock;
pub mod config;
pub mod entity;
pub mod error;
pub mod logging;
pub mod manager;
pub mod storage;

pub use config::{NotekeepConfig, Project};
pub use entity::{Collection, Note, NoteId};
pub use error::{NotekeepError, Result};
pub use manager::{EditState, NoteManager, SubmitOutcome};
pub use storage::{FileKvStore, KeyValueStore, MemoryKvStore, NoteStore};
