//! File-backed storage implementation
//!
//! All keys live in one JSON object file (`state.json` in the config
//! directory by default). The file is re-read on every access and rewritten
//! on every mutation, so separate processes observe each other's changes.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::KeyValueStore;

/// State filename in the Onebox config directory
const STATE_FILE: &str = "state.json";

/// JSON-file implementation of KeyValueStore
pub struct FileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FileStore {
    /// Open (or lazily create) a store at an explicit path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Open the store in the default config directory
    pub fn open_default() -> Result<Self> {
        let path = config::config_path(STATE_FILE).context("Could not determine config directory")?;
        Ok(Self::new(path))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        config::load_json_file(&self.path)
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        config::save_json_file(&self.path, entries)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().unwrap();
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().unwrap();
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().unwrap();
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}
