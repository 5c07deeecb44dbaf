//! Application settings and their store.
//!
//! Same lifecycle as the shortcut mapping: merge the persisted record over
//! the defaults field by field, save synchronously on every change.

use crate::defaults::{self, SETTINGS_RECORD};
use crate::error::ConfigError;
use crate::observers::{Observers, SubscriptionId};
use crate::persistence::KeyValueStore;
use serde::Serialize;
use serde_yaml_ng::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Named behavioral options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppSettings {
    /// Seconds moved by one rewind/forward step (at least 1)
    pub seek_seconds: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            seek_seconds: defaults::seek_seconds(),
        }
    }
}

impl AppSettings {
    /// Build settings from the raw persisted record, field by field.
    pub fn merge_record(raw: Option<&str>) -> Self {
        let mut settings = Self::default();

        let Some(raw) = raw else {
            log::info!("No persisted settings, using defaults");
            return settings;
        };

        let record: BTreeMap<String, Value> = match serde_yaml_ng::from_str(raw) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Failed to parse settings record, using defaults: {}", e);
                return settings;
            }
        };

        if let Some(value) = record.get("seek_seconds") {
            match value.as_u64().and_then(|n| u32::try_from(n).ok()) {
                Some(secs) if secs >= 1 => settings.seek_seconds = secs,
                _ => log::warn!(
                    "Invalid seek_seconds {:?}, using default {}",
                    value,
                    settings.seek_seconds
                ),
            }
        }

        settings
    }

    /// Serialize to the persisted record format.
    pub fn to_record(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}

/// Single source of truth for `AppSettings`.
pub struct SettingsStore {
    backend: Box<dyn KeyValueStore>,
    settings: AppSettings,
    observers: Observers<AppSettings>,
}

impl fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsStore")
            .field("settings", &self.settings)
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}

impl SettingsStore {
    /// Open the store and load the persisted settings.
    pub fn open(backend: Box<dyn KeyValueStore>) -> Self {
        let settings = Self::read_settings(backend.as_ref());
        Self {
            backend,
            settings,
            observers: Observers::default(),
        }
    }

    /// Re-read the persisted record, replacing the in-memory settings.
    pub fn load(&mut self) -> AppSettings {
        self.settings = Self::read_settings(self.backend.as_ref());
        self.settings
    }

    fn read_settings(backend: &dyn KeyValueStore) -> AppSettings {
        let raw = match backend.read(SETTINGS_RECORD) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("Failed to read settings record, using defaults: {}", e);
                None
            }
        };
        AppSettings::merge_record(raw.as_deref())
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Change the seek step. Zero is rejected.
    pub fn update_seek_seconds(&mut self, seek_seconds: u32) -> Result<(), ConfigError> {
        if seek_seconds == 0 {
            return Err(ConfigError::Validation(
                "seek_seconds must be at least 1".to_string(),
            ));
        }
        log::info!("Updating seek_seconds: {}", seek_seconds);
        self.settings.seek_seconds = seek_seconds;
        self.persist();
        self.observers.notify(&self.settings);
        Ok(())
    }

    /// Restore default settings, persist and notify.
    pub fn reset(&mut self) {
        log::info!("Resetting settings to defaults");
        self.settings = AppSettings::default();
        self.persist();
        self.observers.notify(&self.settings);
    }

    /// Write the current settings to the backend.
    pub fn save(&self) -> Result<(), ConfigError> {
        let record = self.settings.to_record()?;
        self.backend.write(SETTINGS_RECORD, &record)
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            log::error!("Failed to save settings: {}", e);
        }
    }

    pub fn subscribe(&mut self, callback: impl Fn(&AppSettings) + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }
}
