//! Key event matching.
//!
//! Matches key presses against configured bindings, taking the focus context
//! into account:
//! - Key identifier and modifier set must match exactly
//! - Modifier-less bindings never fire while an editable text surface has
//!   focus, so plain keys keep working for typing
//! - With nothing configured on it, a plain whitespace press on a
//!   non-editable surface falls back to play/pause

use crate::codec::{self, KeyInput};
use listening_trainer_config::{Action, Binding, Modifiers, ShortcutConfig};

/// Whether the surface that received the key press accepts text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusContext {
    /// Text input, text area or any content-editable region
    Editable,
    /// Player surface, buttons, the window background
    #[default]
    NonEditable,
}

impl FocusContext {
    pub fn from_editable(target_is_editable: bool) -> Self {
        if target_is_editable {
            FocusContext::Editable
        } else {
            FocusContext::NonEditable
        }
    }

    pub fn is_editable(self) -> bool {
        self == FocusContext::Editable
    }
}

/// The action a key press resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub action: Action,
    /// True when no configured binding matched and the whitespace fallback fired
    pub fallback: bool,
}

/// Matcher for comparing one key press against bindings.
#[derive(Debug)]
pub struct KeybindingMatcher {
    /// Active modifiers from the event
    modifiers: Modifiers,
    /// Physical key identifier from the event
    code: String,
}

impl KeybindingMatcher {
    /// Create a matcher from a key press.
    pub fn from_input(input: &KeyInput) -> Self {
        Self {
            modifiers: input.modifiers,
            code: input.code.clone(),
        }
    }

    /// Check if this event matches `binding` in the given focus context.
    ///
    /// A binding without a key never matches.
    pub fn matches(&self, binding: &Binding, focus: FocusContext) -> bool {
        if binding.key().is_empty() {
            return false;
        }

        // Check key first (quick rejection)
        if self.code != binding.key() || self.modifiers != binding.modifiers() {
            return false;
        }

        // Unmodified keys belong to the text field while it has focus
        !(focus.is_editable() && !binding.has_modifiers())
    }

    /// Check against a canonical binding string.
    ///
    /// Empty or malformed strings never match.
    pub fn matches_canonical(&self, canonical: &str, focus: FocusContext) -> bool {
        match Binding::parse(canonical) {
            Ok(binding) => self.matches(&binding, focus),
            Err(_) => false,
        }
    }

    /// Resolve the event against the whole mapping.
    ///
    /// Configured bindings are tried in `Action::ALL` order and the first
    /// match wins; the whitespace fallback is only consulted afterwards.
    pub fn lookup(&self, config: &ShortcutConfig, focus: FocusContext) -> Option<Resolution> {
        if let Some((action, _)) = config
            .iter()
            .find(|(_, binding)| self.matches(binding, focus))
        {
            return Some(Resolution {
                action,
                fallback: false,
            });
        }

        if !focus.is_editable() && self.code == codec::SPACE && self.modifiers.is_empty() {
            return Some(Resolution {
                action: Action::PlayPause,
                fallback: true,
            });
        }

        None
    }
}

/// Check whether `input` satisfies `binding` in the given focus context.
pub fn matches(input: &KeyInput, binding: &Binding, focus: FocusContext) -> bool {
    KeybindingMatcher::from_input(input).matches(binding, focus)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding(s: &str) -> Binding {
        Binding::parse(s).unwrap()
    }

    fn input(canonical: &str) -> KeyInput {
        let b = binding(canonical);
        KeyInput::new(b.key(), b.modifiers())
    }

    #[test]
    fn test_exact_match() {
        let matcher = KeybindingMatcher::from_input(&input("Meta+ArrowRight"));
        assert!(matcher.matches(&binding("Meta+ArrowRight"), FocusContext::NonEditable));
    }

    #[test]
    fn test_extra_or_missing_modifiers_reject() {
        let matcher = KeybindingMatcher::from_input(&input("Meta+Shift+ArrowRight"));
        assert!(!matcher.matches(&binding("Meta+ArrowRight"), FocusContext::NonEditable));

        let matcher = KeybindingMatcher::from_input(&input("ArrowRight"));
        assert!(!matcher.matches(&binding("Meta+ArrowRight"), FocusContext::NonEditable));
    }

    #[test]
    fn test_different_key_rejects() {
        let matcher = KeybindingMatcher::from_input(&input("Meta+ArrowLeft"));
        assert!(!matcher.matches(&binding("Meta+ArrowRight"), FocusContext::NonEditable));
    }

    #[test]
    fn test_editable_suppresses_plain_binding() {
        let matcher = KeybindingMatcher::from_input(&input("Space"));
        assert!(!matcher.matches(&binding("Space"), FocusContext::Editable));
        assert!(matcher.matches(&binding("Space"), FocusContext::NonEditable));
    }

    #[test]
    fn test_editable_allows_modified_binding() {
        let matcher = KeybindingMatcher::from_input(&input("Meta+ArrowRight"));
        assert!(matcher.matches(&binding("Meta+ArrowRight"), FocusContext::Editable));
    }

    #[test]
    fn test_invalid_canonical_never_matches() {
        let matcher = KeybindingMatcher::from_input(&input("Space"));
        assert!(!matcher.matches_canonical("", FocusContext::NonEditable));
        assert!(!matcher.matches_canonical("Meta+", FocusContext::NonEditable));
        assert!(matcher.matches_canonical("Space", FocusContext::NonEditable));
    }

    #[test]
    fn test_lookup_defaults() {
        let config = ShortcutConfig::default();
        let matcher = KeybindingMatcher::from_input(&input("ArrowLeft"));
        assert_eq!(
            matcher.lookup(&config, FocusContext::NonEditable),
            Some(Resolution {
                action: Action::Rewind,
                fallback: false
            })
        );
        assert_eq!(matcher.lookup(&config, FocusContext::Editable), None);
    }

    #[test]
    fn test_lookup_space_fallback() {
        let mut config = ShortcutConfig::default();
        config.set(Action::PlayPause, binding("Ctrl+KeyP"));

        let matcher = KeybindingMatcher::from_input(&input("Space"));
        assert_eq!(
            matcher.lookup(&config, FocusContext::NonEditable),
            Some(Resolution {
                action: Action::PlayPause,
                fallback: true
            })
        );
        assert_eq!(matcher.lookup(&config, FocusContext::Editable), None);

        let matcher = KeybindingMatcher::from_input(&input("Shift+Space"));
        assert_eq!(matcher.lookup(&config, FocusContext::NonEditable), None);
    }

    #[test]
    fn test_lookup_configured_space_wins_over_fallback() {
        let mut config = ShortcutConfig::default();
        config.set(Action::PlayPause, binding("KeyK"));
        config.set(Action::Forward, binding("Space"));

        let matcher = KeybindingMatcher::from_input(&input("Space"));
        assert_eq!(
            matcher.lookup(&config, FocusContext::NonEditable),
            Some(Resolution {
                action: Action::Forward,
                fallback: false
            })
        );
    }

    #[test]
    fn test_lookup_first_action_wins_on_duplicates() {
        let mut config = ShortcutConfig::default();
        config.set(Action::Rewind, binding("Alt+KeyJ"));
        config.set(Action::Forward, binding("Alt+KeyJ"));

        let matcher = KeybindingMatcher::from_input(&input("Alt+KeyJ"));
        let resolution = matcher.lookup(&config, FocusContext::Editable).unwrap();
        assert_eq!(resolution.action, Action::Rewind);
    }

    #[test]
    fn test_free_function() {
        assert!(matches(
            &input("Meta+ArrowRight"),
            &binding("Meta+ArrowRight"),
            FocusContext::from_editable(true)
        ));
        assert!(!matches(
            &input("Space"),
            &binding("Space"),
            FocusContext::from_editable(true)
        ));
    }

    #[test]
    fn test_keyless_binding_never_matches() {
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        let keyless = Binding::new(ctrl, "");
        let matcher = KeybindingMatcher::from_input(&KeyInput::new("", ctrl));
        assert!(!matcher.matches(&keyless, FocusContext::NonEditable));
        assert!(!matcher.matches_canonical("Ctrl+", FocusContext::NonEditable));
    }
}
