mod file_store;
mod memory;
mod note_store;

pub use file_store::FileKvStore;
pub use memory::MemoryKvStore;
pub use note_store::{NoteStore, DEFAULT_STORAGE_KEY};

use async_trait::async_trait;

use crate::error::Result;

/// String-valued async key-value storage.
///
/// Each call stands alone: there are no transactions, so a get followed by
/// a set is not atomic with respect to other writers of the same key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, or `None` if nothing was ever written.
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`.
    async fn set_item(&self, key: &str, value: String) -> Result<()>;

    /// Drop `key`. Removing a missing key is not an error.
    async fn remove_item(&self, key: &str) -> Result<()>;
}

