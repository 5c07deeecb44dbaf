//! Typed error variants for the listening-trainer-config crate.
//!
//! Provides structured error types for persistence I/O and for parsing the
//! canonical binding strings stored in the shortcut record. Loading never
//! surfaces these to the user (malformed data falls back to defaults), but
//! explicit `save()` calls and the raw `KeyValueStore` backends return them.

use thiserror::Error;

/// Errors that can occur when reading or writing a persisted record.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing a record file.
    #[error("I/O error accessing config record: {0}")]
    Io(#[from] std::io::Error),

    /// A record contained invalid YAML, or a value could not be serialized.
    #[error("YAML error in config record: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string describes which field is invalid and why.
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Error produced when a canonical binding string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The string was empty or only whitespace.
    #[error("Empty key combination")]
    Empty,

    /// A `+`-separated segment was empty (e.g. `Meta++KeyA` or `Meta+`).
    #[error("Empty segment in key combination '{0}'")]
    EmptySegment(String),

    /// A segment before the key was not a known modifier name.
    #[error("Unknown modifier '{0}'")]
    UnknownModifier(String),

    /// The combination ends with a modifier and names no key.
    #[error("Key combination ends with modifier, no key specified")]
    MissingKey,

    /// The key identifier contains whitespace.
    #[error("Invalid key identifier '{0}'")]
    InvalidKey(String),
}
