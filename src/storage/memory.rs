use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::KeyValueStore;
use crate::error::{NotekeepError, Result};

fn unavailable() -> NotekeepError {
    std::io::Error::other("storage unavailable").into()
}

#[derive(Debug, Default)]
struct MemoryState {
    items: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
    reads: usize,
    writes: usize,
}

/// In-process store. Clones share the same contents, which lets two
/// managers point at one "device".
///
/// Reads and writes can be made to fail on demand.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn fail_reads(&self, fail: bool) {
        self.state.lock().await.fail_reads = fail;
    }

    pub async fn fail_writes(&self, fail: bool) {
        self.state.lock().await.fail_writes = fail;
    }

    /// Number of `get_item` calls, failed ones included.
    pub async fn read_count(&self) -> usize {
        self.state.lock().await.reads
    }

    /// Number of `set_item`/`remove_item` calls, failed ones included.
    pub async fn write_count(&self) -> usize {
        self.state.lock().await.writes
    }

    /// Raw value under `key`, bypassing failure injection and counters.
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.state.lock().await.items.get(key).cloned()
    }

    /// Store a raw value, bypassing failure injection and counters.
    pub async fn plant(&self, key: &str, value: &str) {
        self.state
            .lock()
            .await
            .items
            .insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl KeyValueStore for MemoryKvStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let mut state = self.state.lock().await;
        state.reads += 1;
        if state.fail_reads {
            return Err(unavailable());
        }
        Ok(state.items.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> Result<()> {
        let mut state = self.state.lock().await;
        state.writes += 1;
        if state.fail_writes {
            return Err(unavailable());
        }
        state.items.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        state.writes += 1;
        if state.fail_writes {
            return Err(unavailable());
        }
        state.items.remove(key);
        Ok(())
    }
}
