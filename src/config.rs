//! Project directory discovery and `.notekeep/config.json`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::entity::{validate_timestamp_format, DEFAULT_TIMESTAMP_FORMAT};
use crate::error::{NotekeepError, Result};
use crate::manager::NoteManager;
use crate::storage::{FileKvStore, NoteStore, DEFAULT_STORAGE_KEY};

pub const NOTEKEEP_DIR: &str = ".notekeep";
pub const CONFIG_FILE: &str = "config.json";
pub const DEFAULT_STORAGE_FILE: &str = "storage.json";

/// Points directly at a `.notekeep` directory, skipping discovery.
pub const NOTEKEEP_DIR_ENV: &str = "NOTEKEEP_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotekeepConfig {
    /// Key the note collection is stored under.
    pub storage_key: String,
    /// chrono format string for note timestamps.
    pub timestamp_format: String,
    /// Store file, relative to the `.notekeep` directory.
    pub storage_file: String,
}

impl Default for NotekeepConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            storage_file: DEFAULT_STORAGE_FILE.to_string(),
        }
    }
}

impl NotekeepConfig {
    /// Read `config.json` from `dir`. A missing file means defaults.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| NotekeepError::Config(format!("{}: {}", path.display(), e)))?;
        validate_timestamp_format(&config.timestamp_format)?;
        Ok(config)
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(dir.join(CONFIG_FILE), contents)?;
        Ok(())
    }
}

/// An initialized `.notekeep` directory and its config.
#[derive(Debug, Clone)]
pub struct Project {
    dir: PathBuf,
    config: NotekeepConfig,
}

impl Project {
    /// Create `.notekeep/` under `root` with a default config.
    pub fn init(root: &Path) -> Result<Self> {
        let dir = root.join(NOTEKEEP_DIR);
        if dir.exists() {
            return Err(NotekeepError::AlreadyInitialized);
        }

        fs::create_dir_all(&dir)?;
        let config = NotekeepConfig::default();
        config.save(&dir)?;

        Ok(Self { dir, config })
    }

    /// Open an existing `.notekeep` directory.
    pub fn open(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(NotekeepError::NotInitialized);
        }
        let config = NotekeepConfig::load(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            config,
        })
    }

    /// `$NOTEKEEP_DIR`, or the nearest `.notekeep` at or above the
    /// current directory.
    pub fn discover() -> Result<Self> {
        if let Some(dir) = env::var_os(NOTEKEEP_DIR_ENV) {
            return Self::open(Path::new(&dir));
        }

        let cwd = env::current_dir()?;
        match find_project_dir(&cwd) {
            Some(dir) => Self::open(&dir),
            None => Err(NotekeepError::NotInitialized),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn config(&self) -> &NotekeepConfig {
        &self.config
    }

    pub fn storage_path(&self) -> PathBuf {
        self.dir.join(&self.config.storage_file)
    }

    /// A manager over this project's store file. The list starts empty.
    pub fn manager(&self) -> NoteManager<FileKvStore> {
        let store = NoteStore::with_key(
            FileKvStore::new(self.storage_path()),
            self.config.storage_key.clone(),
        );
        NoteManager::new(store).with_timestamp_format(self.config.timestamp_format.clone())
    }
}

/// Walk up from `start` looking for a `.notekeep` directory.
fn find_project_dir(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|p| p.join(NOTEKEEP_DIR))
        .find(|candidate| candidate.is_dir())
}
