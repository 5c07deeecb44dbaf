//! Configuration system for listening-trainer.
//!
//! This crate owns everything the shortcut engine persists:
//!
//! - Shortcut data types (`Action`, `Binding`, `Modifiers`) and the canonical
//!   binding string form
//! - Compiled-in defaults
//! - `ShortcutStore` / `SettingsStore`, the only components that touch the
//!   persistence layer
//! - Persistence backends (`FileStore`, `MemoryStore`)

pub mod defaults;
mod error;
mod observers;
pub mod persistence;
mod settings;
mod shortcuts;
mod types;

pub use error::{ConfigError, ParseError};
pub use observers::SubscriptionId;
pub use persistence::{FileStore, KeyValueStore, MemoryStore};
pub use settings::{AppSettings, SettingsStore};
pub use shortcuts::{ShortcutConfig, ShortcutStore};
pub use types::{Action, Binding, Modifiers};
