//! The closed set of actions a shortcut can trigger.

use serde::Serialize;
use std::fmt;

/// A user-invocable operation that a shortcut can trigger.
///
/// The set is fixed at build time. Adding a variant requires adding it to
/// [`Action::ALL`] and giving it a default binding in
/// [`crate::defaults::binding_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Toggle media playback
    PlayPause,
    /// Seek backward by the configured step
    Rewind,
    /// Seek forward by the configured step
    Forward,
}

impl Action {
    /// Every action, in matching priority order.
    pub const ALL: [Action; 3] = [Action::PlayPause, Action::Rewind, Action::Forward];

    /// Identifier used as the key in the persisted shortcut record.
    pub fn id(self) -> &'static str {
        match self {
            Action::PlayPause => "play_pause",
            Action::Rewind => "rewind",
            Action::Forward => "forward",
        }
    }

    /// Look up an action by its persisted identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.id() == id)
    }

    /// Human-readable label for the settings surface.
    pub fn label(self) -> &'static str {
        match self {
            Action::PlayPause => "Play / Pause",
            Action::Rewind => "Rewind",
            Action::Forward => "Forward",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
