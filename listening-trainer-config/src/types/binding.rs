//! Binding types and the canonical string form.
//!
//! A binding is a set of modifiers plus exactly one physical key identifier
//! (the platform's layout-independent code, e.g. `KeyA`, `Digit1`,
//! `ArrowLeft`, `Space`). Its canonical string lists the present modifiers in
//! the fixed order `Meta`, `Ctrl`, `Alt`, `Shift`, then the key, all joined
//! with `+`: `Meta+Shift+KeyA`, `Ctrl+ArrowRight`, `Space`.

use crate::error::ParseError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Set of active modifiers for a binding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Cmd on macOS, Windows/Super key elsewhere
    pub meta: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        meta: false,
        ctrl: false,
        alt: false,
        shift: false,
    };

    /// Returns true when no modifier is held.
    pub fn is_empty(&self) -> bool {
        !(self.meta || self.ctrl || self.alt || self.shift)
    }

    /// Canonical names of the held modifiers, in storage order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        [
            (self.meta, "Meta"),
            (self.ctrl, "Ctrl"),
            (self.alt, "Alt"),
            (self.shift, "Shift"),
        ]
        .into_iter()
        .filter_map(|(held, name)| held.then_some(name))
    }

    /// Set the flag named by `name`, accepting the usual aliases
    /// case-insensitively. Returns false when `name` is not a modifier.
    fn set_by_name(&mut self, name: &str) -> bool {
        match name.to_lowercase().as_str() {
            "meta" | "cmd" | "command" | "super" | "win" => self.meta = true,
            "ctrl" | "control" => self.ctrl = true,
            "alt" | "option" => self.alt = true,
            "shift" => self.shift = true,
            _ => return false,
        }
        true
    }
}

/// A key combination: modifier set plus one physical key identifier.
///
/// Equality and hashing follow the canonical string, so two bindings built
/// from differently ordered modifier lists compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Binding {
    modifiers: Modifiers,
    key: String,
}

impl Binding {
    /// Build a binding from its parts.
    ///
    /// The key identifier is stored as-is; unknown identifiers are valid.
    pub fn new(modifiers: Modifiers, key: impl Into<String>) -> Self {
        Self {
            modifiers,
            key: key.into(),
        }
    }

    /// A binding with no modifiers.
    pub fn key_only(key: impl Into<String>) -> Self {
        Self::new(Modifiers::NONE, key)
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// The physical key identifier (e.g. `KeyA`, `ArrowRight`).
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns true when the binding carries at least one modifier.
    pub fn has_modifiers(&self) -> bool {
        !self.modifiers.is_empty()
    }

    /// The canonical storage string.
    pub fn canonical(&self) -> String {
        self.to_string()
    }

    /// Parse a canonical binding string.
    ///
    /// Every segment but the last must be a modifier name (any order, any
    /// case, duplicates collapse); the last segment is the key identifier.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::Empty);
        }

        let parts: Vec<&str> = trimmed.split('+').map(str::trim).collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(ParseError::EmptySegment(trimmed.to_string()));
        }

        let (key, modifier_parts) = parts
            .split_last()
            .ok_or(ParseError::Empty)?;

        let mut modifiers = Modifiers::default();
        for part in modifier_parts {
            if !modifiers.set_by_name(part) {
                return Err(ParseError::UnknownModifier((*part).to_string()));
            }
        }

        // A bare modifier in the key position means no key was given
        if Modifiers::default().set_by_name(key) {
            return Err(ParseError::MissingKey);
        }
        if key.chars().any(char::is_whitespace) {
            return Err(ParseError::InvalidKey((*key).to_string()));
        }

        Ok(Self::new(modifiers, *key))
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in self.modifiers.names() {
            write!(f, "{name}+")?;
        }
        write!(f, "{}", self.key)
    }
}

impl FromStr for Binding {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Binding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Binding {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
