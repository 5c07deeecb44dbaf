//! Shortcut engine: the single entry point for key events.
//!
//! Every key press goes through [`ShortcutEngine::handle`]:
//! 1. An active capture session consumes the event exclusively
//! 2. Otherwise the matcher resolves it against the current mapping
//!    (configured bindings first, then the whitespace fallback)
//! 3. The resolved action's handlers are invoked

use crate::capture::{CaptureOutcome, CaptureSession, CaptureState};
use crate::codec::{self, KeyInput};
use crate::conflicts::{self, ReservedShortcut};
use crate::matcher::{FocusContext, KeybindingMatcher, Resolution};
use listening_trainer_config::{Action, Binding, ShortcutStore};
use std::collections::HashMap;
use std::fmt;

/// What the engine did with one key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleOutcome {
    /// The capture session recorded a new binding
    Captured { action: Action, binding: Binding },
    /// The capture session was cancelled with Escape
    CaptureCancelled(Action),
    /// A modifier key arrived during capture; still listening
    CaptureIgnored,
    /// An action was resolved and its handlers invoked
    Dispatched(Resolution),
    /// Nothing matched
    Unhandled,
}

impl HandleOutcome {
    /// Whether the caller should suppress the platform's default behavior
    /// for this event (e.g. scrolling on Space or the arrow keys).
    pub fn suppress_default(&self) -> bool {
        !matches!(self, HandleOutcome::Unhandled)
    }
}

/// One row of the shortcut settings surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutRow {
    pub action: Action,
    pub label: &'static str,
    pub binding: Binding,
    /// Human-readable binding, e.g. `Meta+Right`
    pub display: String,
    /// True while this row is waiting for a key press
    pub listening: bool,
    /// Advisory warning when the binding collides with a platform shortcut
    pub conflict: Option<&'static ReservedShortcut>,
}

type ActionHandler = Box<dyn FnMut()>;

/// Owns the shortcut store, the capture session and the action handlers.
pub struct ShortcutEngine {
    store: ShortcutStore,
    capture: CaptureSession,
    handlers: HashMap<Action, Vec<ActionHandler>>,
}

impl fmt::Debug for ShortcutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutEngine")
            .field("store", &self.store)
            .field("capture", &self.capture)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl ShortcutEngine {
    pub fn new(store: ShortcutStore) -> Self {
        Self {
            store,
            capture: CaptureSession::new(),
            handlers: HashMap::new(),
        }
    }

    pub fn store(&self) -> &ShortcutStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ShortcutStore {
        &mut self.store
    }

    /// Register a handler invoked whenever `action` is requested.
    ///
    /// Handlers run in registration order.
    pub fn on_action(&mut self, action: Action, handler: impl FnMut() + 'static) {
        self.handlers
            .entry(action)
            .or_default()
            .push(Box::new(handler));
    }

    /// Invoke every handler registered for `action`. Returns false if there
    /// were none.
    pub fn invoke(&mut self, action: Action) -> bool {
        match self.handlers.get_mut(&action) {
            Some(handlers) if !handlers.is_empty() => {
                for handler in handlers.iter_mut() {
                    handler();
                }
                true
            }
            _ => {
                log::debug!("No handler registered for '{}'", action);
                false
            }
        }
    }

    /// Process one key press.
    pub fn handle(&mut self, input: &KeyInput, focus: FocusContext) -> HandleOutcome {
        match self.capture.process(input) {
            CaptureOutcome::NotListening => {}
            CaptureOutcome::Ignored => return HandleOutcome::CaptureIgnored,
            CaptureOutcome::Cancelled(action) => return HandleOutcome::CaptureCancelled(action),
            CaptureOutcome::Captured { action, binding } => {
                if let Some(reserved) = conflicts::reserved_conflict(&binding) {
                    log::warn!(
                        "Binding {} for '{}' collides with reserved shortcut ({})",
                        binding,
                        action,
                        reserved.description
                    );
                }
                self.store.update(action, binding.clone());
                return HandleOutcome::Captured { action, binding };
            }
        }

        let matcher = KeybindingMatcher::from_input(input);
        match matcher.lookup(self.store.config(), focus) {
            Some(resolution) => {
                log::debug!(
                    "Key {} -> '{}'{}",
                    codec::from_event(input),
                    resolution.action,
                    if resolution.fallback { " (fallback)" } else { "" }
                );
                self.invoke(resolution.action);
                HandleOutcome::Dispatched(resolution)
            }
            None => HandleOutcome::Unhandled,
        }
    }

    /// Start rebinding `action`. Replaces any capture in progress.
    pub fn begin_capture(&mut self, action: Action) {
        self.capture.start(action);
    }

    /// Abandon the capture in progress, e.g. when the settings surface closes.
    pub fn cancel_capture(&mut self) -> Option<Action> {
        self.capture.cancel()
    }

    pub fn capture_state(&self) -> CaptureState {
        self.capture.state()
    }

    /// Set a binding directly (outside capture). Reserved combinations are
    /// accepted.
    pub fn update(&mut self, action: Action, binding: Binding) {
        self.store.update(action, binding);
    }

    /// Restore all default bindings.
    pub fn reset(&mut self) {
        self.store.reset();
    }

    /// Rows for the settings surface, in `Action::ALL` order.
    pub fn settings_rows(&self) -> Vec<ShortcutRow> {
        let target = self.capture.target();
        self.store
            .config()
            .iter()
            .map(|(action, binding)| ShortcutRow {
                action,
                label: action.label(),
                binding: binding.clone(),
                display: codec::display_binding(binding),
                listening: target == Some(action),
                conflict: conflicts::reserved_conflict(binding),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use listening_trainer_config::{MemoryStore, Modifiers};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn engine() -> ShortcutEngine {
        ShortcutEngine::new(ShortcutStore::open(Box::new(MemoryStore::new())))
    }

    fn recorder(engine: &mut ShortcutEngine) -> Rc<RefCell<Vec<Action>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        for action in Action::ALL {
            let log = Rc::clone(&log);
            engine.on_action(action, move || log.borrow_mut().push(action));
        }
        log
    }

    fn meta() -> Modifiers {
        Modifiers {
            meta: true,
            ..Modifiers::NONE
        }
    }

    #[test]
    fn test_dispatch_default_bindings() {
        let mut engine = engine();
        let log = recorder(&mut engine);

        let outcome = engine.handle(&KeyInput::plain("ArrowRight"), FocusContext::NonEditable);
        assert!(outcome.suppress_default());
        assert_eq!(*log.borrow(), vec![Action::Forward]);

        let outcome = engine.handle(&KeyInput::plain("KeyX"), FocusContext::NonEditable);
        assert_eq!(outcome, HandleOutcome::Unhandled);
        assert!(!outcome.suppress_default());
    }

    #[test]
    fn test_editable_focus_keeps_plain_keys() {
        let mut engine = engine();
        let log = recorder(&mut engine);

        let outcome = engine.handle(&KeyInput::plain("Space"), FocusContext::Editable);
        assert_eq!(outcome, HandleOutcome::Unhandled);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_capture_bypasses_matcher() {
        let mut engine = engine();
        let log = recorder(&mut engine);

        engine.begin_capture(Action::Forward);
        let outcome = engine.handle(&KeyInput::plain("ArrowLeft"), FocusContext::NonEditable);
        assert_eq!(
            outcome,
            HandleOutcome::Captured {
                action: Action::Forward,
                binding: Binding::key_only("ArrowLeft"),
            }
        );
        assert!(log.borrow().is_empty());
        assert_eq!(engine.capture_state(), CaptureState::Idle);
    }

    #[test]
    fn test_captured_binding_used_immediately() {
        let mut engine = engine();
        let log = recorder(&mut engine);

        engine.begin_capture(Action::Forward);
        engine.handle(&KeyInput::new("ArrowLeft", meta()), FocusContext::NonEditable);
        engine.handle(&KeyInput::new("ArrowLeft", meta()), FocusContext::Editable);
        assert_eq!(*log.borrow(), vec![Action::Forward]);
        assert_eq!(
            engine.store().binding(Action::Forward).canonical(),
            "Meta+ArrowLeft"
        );
    }

    #[test]
    fn test_capture_ignored_and_cancelled() {
        let mut engine = engine();
        engine.begin_capture(Action::Rewind);
        assert_eq!(
            engine.handle(&KeyInput::new("MetaLeft", meta()), FocusContext::NonEditable),
            HandleOutcome::CaptureIgnored
        );
        assert_eq!(
            engine.handle(&KeyInput::plain("Escape"), FocusContext::NonEditable),
            HandleOutcome::CaptureCancelled(Action::Rewind)
        );
        assert_eq!(engine.store().binding(Action::Rewind).canonical(), "ArrowLeft");
    }

    #[test]
    fn test_reserved_capture_is_accepted() {
        let mut engine = engine();
        engine.begin_capture(Action::PlayPause);
        engine.handle(&KeyInput::new("Space", meta()), FocusContext::NonEditable);
        assert_eq!(engine.store().binding(Action::PlayPause).canonical(), "Meta+Space");

        let rows = engine.settings_rows();
        let row = &rows[0];
        assert_eq!(row.action, Action::PlayPause);
        assert_eq!(row.display, "Meta+Space");
        assert!(row.conflict.is_some());
    }

    #[test]
    fn test_settings_rows() {
        let mut engine = engine();
        engine.begin_capture(Action::Rewind);
        let rows = engine.settings_rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].label, "Rewind");
        assert_eq!(rows[1].display, "Left");
        assert!(rows[1].listening);
        assert!(!rows[0].listening);
        assert!(rows.iter().all(|row| row.conflict.is_none()));
    }

    #[test]
    fn test_invoke_without_handlers() {
        let mut engine = engine();
        assert!(!engine.invoke(Action::PlayPause));
        let outcome = engine.handle(&KeyInput::plain("Space"), FocusContext::NonEditable);
        assert!(outcome.suppress_default());
    }

    #[test]
    fn test_keyless_event_not_captured() {
        let mut engine = engine();
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        engine.begin_capture(Action::Forward);
        assert_eq!(
            engine.handle(&KeyInput::new("", ctrl), FocusContext::NonEditable),
            HandleOutcome::CaptureIgnored
        );
        assert_eq!(engine.capture_state(), CaptureState::Listening(Action::Forward));
        assert_eq!(engine.store().binding(Action::Forward).canonical(), "ArrowRight");
    }
}
