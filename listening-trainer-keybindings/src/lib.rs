//! Keyboard-shortcut engine for listening-trainer.
//!
//! Decides, for every key press delivered to the focused window, whether it
//! triggers one of the configured actions.
//!
//! Features:
//! - Canonical binding strings built from physical key codes (layout independent)
//! - Editable-focus suppression so unmodified shortcuts never break typing
//! - Whitespace play/pause fallback when nothing else claims the key
//! - Capture mode for rebinding an action with the next key press
//! - Advisory detection of platform-reserved combinations

mod capture;
pub mod codec;
pub mod conflicts;
mod engine;
mod listener;
mod matcher;
pub mod platform;

pub use capture::{CaptureOutcome, CaptureSession, CaptureState};
pub use codec::{KeyInput, from_event, to_display_string};
pub use conflicts::{ReservedShortcut, is_reserved_conflict, reserved_conflict};
pub use engine::{HandleOutcome, ShortcutEngine, ShortcutRow};
pub use listener::{KeyEventHub, KeyEventSource, KeyListener, ListenerId, ListenerRegistration};
pub use matcher::{FocusContext, KeybindingMatcher, Resolution, matches};

// Re-export the configuration types every caller needs alongside the engine
pub use listening_trainer_config::{Action, Binding, Modifiers, ShortcutConfig, ShortcutStore};
