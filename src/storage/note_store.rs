use super::KeyValueStore;
use crate::entity::{Collection, Note};
use crate::error::{NotekeepError, Result};

pub const DEFAULT_STORAGE_KEY: &str = "notes";

/// The note collection, serialized as one JSON array under a single key.
///
/// There is no per-note record: every save replaces the whole array.
pub struct NoteStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> NoteStore<S> {
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Persisted notes, or an empty collection when nothing is stored or
    /// the stored value cannot be read. Never fails.
    pub async fn load(&self) -> Collection {
        match self.try_load().await {
            Ok(notes) => notes,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "treating unreadable notes as empty");
                Vec::new()
            }
        }
    }

    /// Like [`load`](Self::load), but read and decode faults are returned as
    /// `StorageRead`. A missing or empty value is still an empty collection.
    pub async fn try_load(&self) -> Result<Collection> {
        let raw = self
            .backend
            .get_item(&self.key)
            .await
            .map_err(|e| NotekeepError::StorageRead(e.to_string()))?;

        let Some(raw) = raw.filter(|r| !r.is_empty()) else {
            tracing::debug!(key = %self.key, "no stored notes");
            return Ok(Vec::new());
        };

        tracing::debug!(key = %self.key, bytes = raw.len(), "read notes");
        serde_json::from_str(&raw)
            .map_err(|e| NotekeepError::StorageRead(format!("corrupt note data: {}", e)))
    }

    /// Replace the stored collection.
    pub async fn save(&self, notes: &[Note]) -> Result<()> {
        let raw = serde_json::to_string(notes)
            .map_err(|e| NotekeepError::StorageWrite(e.to_string()))?;
        let bytes = raw.len();

        self.backend
            .set_item(&self.key, raw)
            .await
            .map_err(|e| NotekeepError::StorageWrite(e.to_string()))?;

        tracing::debug!(key = %self.key, bytes, count = notes.len(), "saved notes");
        Ok(())
    }

    /// Remove the stored collection entirely.
    pub async fn clear(&self) -> Result<()> {
        self.backend
            .remove_item(&self.key)
            .await
            .map_err(|e| NotekeepError::StorageWrite(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileKvStore, MemoryKvStore};
    use tempfile::TempDir;

    fn sample() -> Vec<Note> {
        vec![
            Note::new(1, "first".to_string(), "01/01/2026, 09:00:00".to_string()),
            Note::new(2, "second".to_string(), "01/01/2026, 09:05:00".to_string()),
        ]
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let store = NoteStore::new(MemoryKvStore::new());
        store.save(&sample()).await.unwrap();
        assert_eq!(store.load().await, sample());
    }

    #[tokio::test]
    async fn test_absent_value_loads_empty() {
        let store = NoteStore::new(MemoryKvStore::new());
        assert!(store.load().await.is_empty());
        assert!(store.try_load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_string_loads_empty() {
        let kv = MemoryKvStore::new();
        kv.plant(DEFAULT_STORAGE_KEY, "").await;
        let store = NoteStore::new(kv);
        assert!(store.try_load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_value_fails_open() {
        let kv = MemoryKvStore::new();
        kv.plant(DEFAULT_STORAGE_KEY, "{{{ nope").await;
        let store = NoteStore::new(kv);

        assert!(store.load().await.is_empty());
        assert!(matches!(
            store.try_load().await,
            Err(NotekeepError::StorageRead(_))
        ));
    }

    #[tokio::test]
    async fn test_read_failure_fails_open() {
        let kv = MemoryKvStore::new();
        kv.plant(DEFAULT_STORAGE_KEY, "[]").await;
        kv.fail_reads(true).await;
        let store = NoteStore::new(kv);

        assert!(store.load().await.is_empty());
        assert!(matches!(
            store.try_load().await,
            Err(NotekeepError::StorageRead(_))
        ));
    }

    #[tokio::test]
    async fn test_write_failure_is_reported() {
        let kv = MemoryKvStore::new();
        kv.fail_writes(true).await;
        let store = NoteStore::new(kv);

        let result = store.save(&sample()).await;
        assert!(matches!(result, Err(NotekeepError::StorageWrite(_))));
    }

    #[tokio::test]
    async fn test_stored_value_is_a_json_array() {
        let kv = MemoryKvStore::new();
        let store = NoteStore::with_key(kv.clone(), "my_notes");
        store.save(&sample()).await.unwrap();

        let raw = kv.raw("my_notes").await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["id"], 1);
        assert_eq!(array[0]["text"], "first");
        assert_eq!(array[1]["timestamp"], "01/01/2026, 09:05:00");
    }

    #[tokio::test]
    async fn test_clear() {
        let kv = MemoryKvStore::new();
        let store = NoteStore::new(kv.clone());
        store.save(&sample()).await.unwrap();

        store.clear().await.unwrap();
        assert_eq!(kv.raw(DEFAULT_STORAGE_KEY).await, None);
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_file_backend_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("storage.json");

        NoteStore::new(FileKvStore::new(&path))
            .save(&sample())
            .await
            .unwrap();

        let reopened = NoteStore::new(FileKvStore::new(&path));
        assert_eq!(reopened.load().await, sample());
    }
}
