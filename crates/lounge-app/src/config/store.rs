//! Key-value persistence port and its implementations
//!
//! The controllers only ever talk to [`ConfigStore`]. Two implementations
//! ship with the crate:
//! - [`FileConfigStore`] - one TOML file per key, atomic writes
//! - [`MemoryConfigStore`] - process-local map (guests, headless, tests)

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use fs2::FileExt;
use lounge_core::prelude::*;

/// Opaque key-value persistence scoped by key.
///
/// `read` returns `Ok(None)` when nothing was ever written under `key`.
#[cfg_attr(test, mockall::automock)]
pub trait ConfigStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>>;

    fn write(&self, key: &str, contents: &str) -> Result<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// File-backed store
// ─────────────────────────────────────────────────────────────────────────────

const RECORD_EXTENSION: &str = "toml";

/// Stores each key as `<root>/<key>.toml`
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    root: PathBuf,
}

impl FileConfigStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store under the per-user data directory
    pub fn default_location() -> Self {
        Self::new(lounge_core::logging::data_directory().join("store"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.{}", key, RECORD_EXTENSION))
    }
}

impl ConfigStore for FileConfigStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| Error::store(format!("Failed to read {:?}: {}", path, e)))
    }

    /// Atomic write: temp file (exclusively locked) then rename over the record.
    fn write(&self, key: &str, contents: &str) -> Result<()> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root)
                .map_err(|e| Error::store(format!("Failed to create store dir: {}", e)))?;
        }

        let path = self.path_for(key);
        let temp_path = self.root.join(format!(".{}.{}.tmp", key, RECORD_EXTENSION));

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| Error::store(format!("Failed to open temp file: {}", e)))?;

        file.lock_exclusive()
            .map_err(|e| Error::store(format!("Failed to lock temp file: {}", e)))?;

        file.write_all(contents.as_bytes())
            .map_err(|e| Error::store(format!("Failed to write temp file: {}", e)))?;
        file.flush()
            .map_err(|e| Error::store(format!("Failed to flush temp file: {}", e)))?;
        drop(file);

        std::fs::rename(&temp_path, &path)
            .map_err(|e| Error::store(format!("Failed to rename temp file: {}", e)))?;

        debug!("Saved record {:?}", path);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory store
// ─────────────────────────────────────────────────────────────────────────────

/// Process-local store; contents vanish with the process
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record, e.g. to simulate a previous session
    pub fn with_entry(self, key: impl Into<String>, contents: impl Into<String>) -> Self {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.into(), contents.into());
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ConfigStore for MemoryConfigStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| Error::store("memory store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, contents: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| Error::store("memory store lock poisoned"))?;
        entries.insert(key.to_string(), contents.to_string());
        Ok(())
    }
}
