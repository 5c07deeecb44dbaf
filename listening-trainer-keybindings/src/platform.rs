//! Platform key tables.
//!
//! Contains:
//! - winit `KeyCode` → physical key identifier conversion
//! - The set of identifiers that name a pure modifier key
//! - Arrow key display labels

use winit::keyboard::KeyCode;

/// Physical key identifier for a winit key code.
///
/// winit names its key codes after the W3C `KeyboardEvent.code` values, so
/// the variant name is the identifier. The Super keys are reported under
/// their W3C `Meta` names.
pub fn key_code_identifier(code: KeyCode) -> String {
    match code {
        KeyCode::SuperLeft => "MetaLeft".to_string(),
        KeyCode::SuperRight => "MetaRight".to_string(),
        other => format!("{:?}", other),
    }
}

/// Check whether a physical key identifier names a modifier key.
///
/// Pressing one of these alone never completes a capture.
pub fn is_modifier_code(code: &str) -> bool {
    matches!(
        code,
        "ShiftLeft"
            | "ShiftRight"
            | "ControlLeft"
            | "ControlRight"
            | "AltLeft"
            | "AltRight"
            | "MetaLeft"
            | "MetaRight"
            | "SuperLeft"
            | "SuperRight"
            | "OSLeft"
            | "OSRight"
            | "Meta"
            | "Hyper"
            | "Fn"
            | "FnLock"
    )
}

/// Display label for an arrow key identifier.
pub fn arrow_label(code: &str) -> Option<&'static str> {
    match code {
        "ArrowLeft" => Some("Left"),
        "ArrowRight" => Some("Right"),
        "ArrowUp" => Some("Up"),
        "ArrowDown" => Some("Down"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_code_identifier() {
        assert_eq!(key_code_identifier(KeyCode::KeyA), "KeyA");
        assert_eq!(key_code_identifier(KeyCode::Digit9), "Digit9");
        assert_eq!(key_code_identifier(KeyCode::Space), "Space");
        assert_eq!(key_code_identifier(KeyCode::NumpadEnter), "NumpadEnter");
        assert_eq!(key_code_identifier(KeyCode::ArrowRight), "ArrowRight");
        assert_eq!(key_code_identifier(KeyCode::SuperLeft), "MetaLeft");
    }

    #[test]
    fn test_winit_modifier_keys_are_modifiers() {
        for code in [
            KeyCode::ShiftLeft,
            KeyCode::ShiftRight,
            KeyCode::ControlLeft,
            KeyCode::ControlRight,
            KeyCode::AltLeft,
            KeyCode::AltRight,
            KeyCode::SuperLeft,
            KeyCode::SuperRight,
        ] {
            assert!(is_modifier_code(&key_code_identifier(code)), "{code:?}");
        }
        assert!(!is_modifier_code("CapsLock"));
        assert!(!is_modifier_code("KeyM"));
    }
}
