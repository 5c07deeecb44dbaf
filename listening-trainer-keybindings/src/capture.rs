//! Capture session: the "press any key" mode used to rebind one action.
//!
//! ```text
//!   Idle --start(a)--> Listening(a)
//!   Listening(a) --modifier key--> Listening(a)
//!   Listening(a) --Escape / cancel()--> Idle
//!   Listening(a) --any other key--> Idle   (binding recorded for a)
//! ```

use crate::codec::{self, KeyInput};
use listening_trainer_config::{Action, Binding};

/// Current state of the capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    /// Waiting for the next key press to become `action`'s binding
    Listening(Action),
}

/// What a key press did to the capture session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// No capture in progress; the event should go to the matcher
    NotListening,
    /// A modifier key alone, or a key with no usable identifier; still listening
    Ignored,
    /// Escape pressed; capture abandoned without changes
    Cancelled(Action),
    /// Capture completed with a new binding for `action`
    Captured { action: Action, binding: Binding },
}

/// Short-lived interactive state machine; at most one per engine.
#[derive(Debug, Default)]
pub struct CaptureSession {
    state: CaptureState,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_listening(&self) -> bool {
        matches!(self.state, CaptureState::Listening(_))
    }

    /// The action being rebound, if listening.
    pub fn target(&self) -> Option<Action> {
        match self.state {
            CaptureState::Idle => None,
            CaptureState::Listening(action) => Some(action),
        }
    }

    /// Begin listening for a new binding for `action`.
    ///
    /// A capture already in progress is abandoned; the latest request wins.
    pub fn start(&mut self, action: Action) {
        if let CaptureState::Listening(previous) = self.state
            && previous != action
        {
            log::warn!(
                "Abandoning capture for '{}' in favour of '{}'",
                previous,
                action
            );
        }
        log::info!("Listening for new binding for '{}'", action);
        self.state = CaptureState::Listening(action);
    }

    /// Stop listening without changing anything. Returns the abandoned
    /// target, if there was one.
    pub fn cancel(&mut self) -> Option<Action> {
        let target = self.target();
        if let Some(action) = target {
            log::info!("Capture for '{}' cancelled", action);
        }
        self.state = CaptureState::Idle;
        target
    }

    /// Feed one key press into the session.
    pub fn process(&mut self, input: &KeyInput) -> CaptureOutcome {
        let CaptureState::Listening(action) = self.state else {
            return CaptureOutcome::NotListening;
        };

        if input.is_modifier_only() {
            log::debug!("Ignoring modifier key {} during capture", input.code);
            return CaptureOutcome::Ignored;
        }

        if input.is_plain_escape() {
            self.state = CaptureState::Idle;
            log::info!("Capture for '{}' cancelled", action);
            return CaptureOutcome::Cancelled(action);
        }

        // Only accept what reads back as the same binding
        let binding = match Binding::parse(&codec::from_event(input)) {
            Ok(binding) => binding,
            Err(e) => {
                log::warn!("Ignoring unusable key {:?} during capture: {}", input.code, e);
                return CaptureOutcome::Ignored;
            }
        };

        self.state = CaptureState::Idle;
        log::info!("Captured {} for '{}'", binding, action);
        CaptureOutcome::Captured { action, binding }
    }
}
