use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::KeyValueStore;
use crate::error::{NotekeepError, Result};

/// All keys live in one JSON object on disk.
///
/// Writes go to a uniquely named sibling file first and are renamed over
/// the target, so a crash mid-write leaves the previous contents intact.
#[derive(Debug)]
pub struct FileKvStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileKvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn read_map(&self) -> Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// The map to build a write on, and whether the file on disk has to be
    /// replaced. An undecodable file counts as empty so that writes, and the
    /// clear that would recover it, are not blocked.
    async fn read_map_for_write(&self) -> Result<(BTreeMap<String, String>, bool)> {
        match self.read_map().await {
            Ok(map) => Ok((map, false)),
            Err(NotekeepError::Json(e)) => {
                tracing::warn!(path = %self.path.display(), error = %e, "replacing undecodable store file");
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    async fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(map)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "store".to_string());
        let tmp = self
            .path
            .with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));

        fs::write(&tmp, &bytes).await?;
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "wrote store file");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileKvStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let mut map = self.read_map().await?;
        Ok(map.remove(key))
    }

    async fn set_item(&self, key: &str, value: String) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let (mut map, _) = self.read_map_for_write().await?;
        map.insert(key.to_string(), value);
        self.write_map(&map).await
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let (mut map, replace) = self.read_map_for_write().await?;
        if map.remove(key).is_some() || replace {
            self.write_map(&map).await?;
        }
        Ok(())
    }
}
