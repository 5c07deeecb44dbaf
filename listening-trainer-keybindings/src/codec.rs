//! Binding codec.
//!
//! Converts between a raw key event, the canonical storage string and the
//! short human-readable label shown in the settings surface. Stateless.

use crate::platform;
use listening_trainer_config::{Binding, Modifiers};
use winit::event::ElementState;
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

/// Physical key identifier of the whitespace key.
pub const SPACE: &str = "Space";

/// Physical key identifier of the escape key.
pub const ESCAPE: &str = "Escape";

/// A key press as delivered by the platform: the layout-independent physical
/// key identifier plus the modifiers held at the time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    /// Physical key identifier, e.g. `KeyA`, `Digit1`, `ArrowLeft`, `Space`
    pub code: String,
    /// Modifiers held while the key was pressed
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn new(code: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            code: code.into(),
            modifiers,
        }
    }

    /// A key press with no modifiers held.
    pub fn plain(code: impl Into<String>) -> Self {
        Self::new(code, Modifiers::NONE)
    }

    /// Returns true if the pressed key is itself a modifier key.
    pub fn is_modifier_only(&self) -> bool {
        platform::is_modifier_code(&self.code)
    }

    /// Returns true for an unmodified whitespace key press.
    pub fn is_plain_space(&self) -> bool {
        self.code == SPACE && self.modifiers.is_empty()
    }

    /// Returns true for an unmodified escape key press.
    pub fn is_plain_escape(&self) -> bool {
        self.code == ESCAPE && self.modifiers.is_empty()
    }

    /// Build an input from a winit physical key code and modifier state.
    ///
    /// The Super/Cmd/Windows key maps to `Meta`.
    pub fn from_key_code(code: KeyCode, state: ModifiersState) -> Self {
        let modifiers = Modifiers {
            meta: state.super_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
            shift: state.shift_key(),
        };
        Self::new(platform::key_code_identifier(code), modifiers)
    }

    /// Build an input from the parts of a winit `KeyEvent`, e.g.
    /// `KeyInput::from_physical_key(event.physical_key, event.state, modifiers.state())`.
    ///
    /// Returns `None` for key releases and for keys the platform could not
    /// identify physically.
    pub fn from_physical_key(
        key: PhysicalKey,
        state: ElementState,
        modifiers: ModifiersState,
    ) -> Option<Self> {
        if state != ElementState::Pressed {
            return None;
        }
        match key {
            PhysicalKey::Code(code) => Some(Self::from_key_code(code, modifiers)),
            PhysicalKey::Unidentified(native) => {
                log::debug!("Ignoring unidentified physical key {:?}", native);
                None
            }
        }
    }
}

/// The binding a key press represents.
pub fn binding_from_event(input: &KeyInput) -> Binding {
    Binding::new(input.modifiers, input.code.clone())
}

/// Canonical storage string for a key press.
///
/// Modifiers are emitted in the fixed `Meta`, `Ctrl`, `Alt`, `Shift` order
/// regardless of the order in which they were pressed.
pub fn from_event(input: &KeyInput) -> String {
    binding_from_event(input).canonical()
}

/// Short label for one physical key identifier.
///
/// `KeyA` → `A`, `Digit1` → `1`, `Numpad2` → `Num 2`, `ArrowLeft` → `Left`.
/// Unknown identifiers pass through unchanged.
pub fn display_key(code: &str) -> String {
    if let Some(arrow) = platform::arrow_label(code) {
        return arrow.to_string();
    }
    if let Some(rest) = code.strip_prefix("Key").filter(|r| !r.is_empty()) {
        return rest.to_string();
    }
    if let Some(rest) = code.strip_prefix("Digit").filter(|r| !r.is_empty()) {
        return rest.to_string();
    }
    if let Some(rest) = code.strip_prefix("Numpad").filter(|r| !r.is_empty()) {
        return format!("Num {rest}");
    }
    code.to_string()
}

/// Human-readable form of a binding: modifiers followed by the key label.
pub fn display_binding(binding: &Binding) -> String {
    let mut parts: Vec<String> = binding.modifiers().names().map(str::to_string).collect();
    parts.push(display_key(binding.key()));
    parts.join("+")
}

/// Human-readable form of a canonical binding string.
///
/// Empty or malformed input yields an empty string.
pub fn to_display_string(canonical: &str) -> String {
    match Binding::parse(canonical) {
        Ok(binding) => display_binding(&binding),
        Err(e) => {
            log::debug!("Cannot display binding '{}': {}", canonical, e);
            String::new()
        }
    }
}
