//! Reserved-combination detection.
//!
//! Advisory only: a reserved binding is still accepted, the settings surface
//! just shows a warning next to it.

use listening_trainer_config::Binding;

/// A platform-level combination that the OS or window manager usually
/// intercepts before the application sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservedShortcut {
    /// Canonical binding string
    pub canonical: &'static str,
    /// What the platform does with it
    pub description: &'static str,
}

/// Fixed denylist of reserved combinations.
pub const RESERVED_SHORTCUTS: &[ReservedShortcut] = &[
    ReservedShortcut {
        canonical: "Meta+KeyH",
        description: "Hide application",
    },
    ReservedShortcut {
        canonical: "Meta+KeyQ",
        description: "Quit application",
    },
    ReservedShortcut {
        canonical: "Meta+KeyW",
        description: "Close window",
    },
    ReservedShortcut {
        canonical: "Meta+Space",
        description: "Global search",
    },
    ReservedShortcut {
        canonical: "Meta+Tab",
        description: "Switch application",
    },
];

/// The reserved combination `binding` collides with, if any.
pub fn reserved_conflict(binding: &Binding) -> Option<&'static ReservedShortcut> {
    let canonical = binding.canonical();
    RESERVED_SHORTCUTS
        .iter()
        .find(|reserved| reserved.canonical == canonical)
}

/// Check whether a canonical binding string collides with a reserved
/// combination. Malformed strings never conflict.
pub fn is_reserved_conflict(canonical: &str) -> bool {
    Binding::parse(canonical)
        .map(|binding| reserved_conflict(&binding).is_some())
        .unwrap_or(false)
}
