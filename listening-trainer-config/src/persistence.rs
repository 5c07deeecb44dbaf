//! Key-value persistence backends for the shortcut and settings records.
//!
//! Covers:
//! - The `KeyValueStore` seam every store writes through
//! - `FileStore` (one YAML file per record, atomic write)
//! - `MemoryStore` (in-process, shared between clones)
//! - XDG-compliant path helpers (`config_dir`)

use crate::defaults::APP_DIR_NAME;
use crate::error::ConfigError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// A flat string key → string value persistence layer.
///
/// Only the shortcut and settings stores talk to this; nothing else in the
/// application touches persisted state directly.
pub trait KeyValueStore {
    /// Read the raw value stored under `key`, or `None` if absent.
    fn read(&self, key: &str) -> Result<Option<String>, ConfigError>;

    /// Replace the value stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), ConfigError>;
}

/// Stores each record as `<dir>/<key>.yaml`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create a store in the per-user configuration directory.
    pub fn in_config_dir() -> Self {
        Self::new(config_dir())
    }

    /// Resolve the file backing `key`.
    ///
    /// Keys are restricted to ASCII alphanumerics, `_` and `-` so a record key
    /// can never resolve outside the store directory.
    pub fn record_path(&self, key: &str) -> Result<PathBuf, ConfigError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(ConfigError::Validation(format!(
                "invalid record key '{key}'"
            )));
        }
        Ok(self.dir.join(format!("{key}.yaml")))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let path = self.record_path(key)?;
        if !path.exists() {
            log::debug!("Record {:?} not found at {:?}", key, path);
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let path = self.record_path(key)?;
        fs::create_dir_all(&self.dir)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, value)?;
        fs::rename(&temp_path, &path)?;

        log::debug!("Wrote record {:?} to {:?}", key, path);
        Ok(())
    }
}

/// In-process store. Clones share the same underlying map, so a clone can be
/// handed to a fresh store to simulate an application restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a record, as if it had never been written.
    pub fn remove(&self, key: &str) {
        self.records.lock().remove(key);
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, ConfigError> {
        Ok(self.records.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.records
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Get the configuration directory path (using XDG convention)
pub fn config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join(APP_DIR_NAME)
        } else {
            PathBuf::from(".")
        }
    }
    #[cfg(not(target_os = "windows"))]
    {
        // Use XDG convention on all platforms: ~/.config/listening-trainer
        if let Some(home_dir) = dirs::home_dir() {
            home_dir.join(".config").join(APP_DIR_NAME)
        } else {
            PathBuf::from(".")
        }
    }
}
