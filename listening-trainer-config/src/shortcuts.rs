//! The action → binding mapping and the store that owns it.
//!
//! Covers:
//! - `ShortcutConfig` (always total: every action has exactly one binding)
//! - Field-by-field merge of a persisted record over the defaults
//! - `ShortcutStore` (load / update / reset, synchronous save, observers)

use crate::defaults::{self, SHORTCUTS_RECORD};
use crate::error::ConfigError;
use crate::observers::{Observers, SubscriptionId};
use crate::persistence::KeyValueStore;
use crate::types::{Action, Binding};
use serde::Serialize;
use serde_yaml_ng::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Mapping from every action to its binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortcutConfig {
    play_pause: Binding,
    rewind: Binding,
    forward: Binding,
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self {
            play_pause: defaults::binding_for(Action::PlayPause),
            rewind: defaults::binding_for(Action::Rewind),
            forward: defaults::binding_for(Action::Forward),
        }
    }
}

impl ShortcutConfig {
    /// The binding configured for `action`.
    pub fn get(&self, action: Action) -> &Binding {
        match action {
            Action::PlayPause => &self.play_pause,
            Action::Rewind => &self.rewind,
            Action::Forward => &self.forward,
        }
    }

    /// Replace the binding for `action`.
    pub fn set(&mut self, action: Action, binding: Binding) {
        let slot = match action {
            Action::PlayPause => &mut self.play_pause,
            Action::Rewind => &mut self.rewind,
            Action::Forward => &mut self.forward,
        };
        *slot = binding;
    }

    /// All (action, binding) pairs in `Action::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Action, &Binding)> {
        Action::ALL.into_iter().map(move |action| (action, self.get(action)))
    }

    /// Actions whose binding equals `binding`.
    pub fn actions_bound_to(&self, binding: &Binding) -> Vec<Action> {
        self.iter()
            .filter(|(_, bound)| *bound == binding)
            .map(|(action, _)| action)
            .collect()
    }

    /// Build a config from the raw persisted record, field by field.
    ///
    /// A missing record, a record that is not a YAML mapping, a missing
    /// action, a non-string value or an unparseable binding each fall back to
    /// the default for just the affected field(s).
    pub fn merge_record(raw: Option<&str>) -> Self {
        let mut config = Self::default();

        let Some(raw) = raw else {
            log::info!("No persisted shortcuts, using defaults");
            return config;
        };

        let record: BTreeMap<String, Value> = match serde_yaml_ng::from_str(raw) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Failed to parse shortcut record, using defaults: {}", e);
                return config;
            }
        };

        for key in record.keys() {
            if Action::from_id(key).is_none() {
                log::debug!("Ignoring unknown action '{}' in shortcut record", key);
            }
        }

        for action in Action::ALL {
            match record.get(action.id()) {
                None => {
                    log::info!(
                        "Action '{}' missing from shortcut record, using default {}",
                        action,
                        config.get(action)
                    );
                }
                Some(Value::String(s)) => match Binding::parse(s) {
                    Ok(binding) => config.set(action, binding),
                    Err(e) => log::warn!(
                        "Invalid binding '{}' for action '{}' ({}), using default {}",
                        s,
                        action,
                        e,
                        config.get(action)
                    ),
                },
                Some(other) => log::warn!(
                    "Non-string binding {:?} for action '{}', using default {}",
                    other,
                    action,
                    config.get(action)
                ),
            }
        }

        config
    }

    /// Serialize to the persisted record format.
    pub fn to_record(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}

/// Single source of truth for the shortcut mapping.
///
/// Owns the persistence backend; every change is written back synchronously
/// and then announced to observers.
pub struct ShortcutStore {
    backend: Box<dyn KeyValueStore>,
    config: ShortcutConfig,
    observers: Observers<ShortcutConfig>,
}

impl fmt::Debug for ShortcutStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutStore")
            .field("config", &self.config)
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}

impl ShortcutStore {
    /// Open the store and load the persisted mapping.
    pub fn open(backend: Box<dyn KeyValueStore>) -> Self {
        let config = Self::read_config(backend.as_ref());
        Self {
            backend,
            config,
            observers: Observers::default(),
        }
    }

    /// Re-read the persisted record, replacing the in-memory mapping.
    ///
    /// Never fails: any problem degrades to per-field defaults.
    pub fn load(&mut self) -> ShortcutConfig {
        self.config = Self::read_config(self.backend.as_ref());
        self.config.clone()
    }

    fn read_config(backend: &dyn KeyValueStore) -> ShortcutConfig {
        let raw = match backend.read(SHORTCUTS_RECORD) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("Failed to read shortcut record, using defaults: {}", e);
                None
            }
        };
        ShortcutConfig::merge_record(raw.as_deref())
    }

    /// The current mapping.
    pub fn config(&self) -> &ShortcutConfig {
        &self.config
    }

    /// The current binding for `action`.
    pub fn binding(&self, action: Action) -> &Binding {
        self.config.get(action)
    }

    /// Set one action's binding, persist the full mapping and notify.
    ///
    /// The in-memory change is kept even if the write fails; the failure is
    /// logged.
    pub fn update(&mut self, action: Action, binding: Binding) {
        log::info!("Updating shortcut: {} -> {}", action, binding);
        self.config.set(action, binding);
        self.persist();
        self.observers.notify(&self.config);
    }

    /// Restore every action to its default binding, persist and notify.
    pub fn reset(&mut self) {
        log::info!("Resetting shortcuts to defaults");
        self.config = ShortcutConfig::default();
        self.persist();
        self.observers.notify(&self.config);
    }

    /// Write the current mapping to the backend.
    pub fn save(&self) -> Result<(), ConfigError> {
        let record = self.config.to_record()?;
        self.backend.write(SHORTCUTS_RECORD, &record)
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            log::error!("Failed to save shortcuts: {}", e);
        }
    }

    /// Register a callback invoked after every update or reset.
    pub fn subscribe(&mut self, callback: impl Fn(&ShortcutConfig) + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    /// Remove a callback. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }
}
