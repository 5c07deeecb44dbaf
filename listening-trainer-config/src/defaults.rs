//! Compiled-in default values.
//!
//! These back every field of the persisted records: a missing or corrupted
//! field is replaced by the value returned here.

use crate::types::{Action, Binding};

/// Default binding for one action.
pub fn binding_for(action: Action) -> Binding {
    match action {
        Action::PlayPause => Binding::key_only("Space"),
        Action::Rewind => Binding::key_only("ArrowLeft"),
        Action::Forward => Binding::key_only("ArrowRight"),
    }
}

/// Default seek step in seconds for rewind/forward.
pub fn seek_seconds() -> u32 {
    5
}

/// Name of the per-user configuration directory.
pub const APP_DIR_NAME: &str = "listening-trainer";

/// Record key of the persisted shortcut mapping.
pub const SHORTCUTS_RECORD: &str = "shortcuts";

/// Record key of the persisted application settings.
pub const SETTINGS_RECORD: &str = "settings";
