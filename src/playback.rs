//! Playback actions.
//!
//! Connects the shortcut engine's actions to the media element. The element
//! itself lives outside this crate and is reached through [`MediaTransport`].

use listening_trainer_config::SettingsStore;
use listening_trainer_keybindings::{Action, ShortcutEngine};
use std::cell::RefCell;
use std::rc::Rc;

/// The media element the actions drive.
///
/// Positions and durations are in seconds.
pub trait MediaTransport {
    fn play(&mut self);
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
    fn position(&self) -> f64;
    fn set_position(&mut self, seconds: f64);
    /// Total length, or a non-positive / non-finite value when unknown
    fn duration(&self) -> f64;
}

/// Implements play/pause and the seek steps on top of a transport.
#[derive(Debug)]
pub struct PlaybackController<T: MediaTransport> {
    transport: T,
    settings: Rc<RefCell<SettingsStore>>,
}

impl<T: MediaTransport> PlaybackController<T> {
    pub fn new(transport: T, settings: Rc<RefCell<SettingsStore>>) -> Self {
        Self {
            transport,
            settings,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Current seek step in seconds, read fresh from the settings store.
    pub fn seek_step(&self) -> f64 {
        f64::from(self.settings.borrow().settings().seek_seconds)
    }

    /// Play if paused, pause otherwise.
    pub fn toggle_play(&mut self) {
        if self.transport.is_paused() {
            self.transport.play();
        } else {
            self.transport.pause();
        }
    }

    /// Move back one step, stopping at the start.
    pub fn rewind(&mut self) {
        let target = (self.transport.position() - self.seek_step()).max(0.0);
        self.transport.set_position(target);
    }

    /// Move forward one step, stopping at the end.
    ///
    /// Does nothing while the duration is unknown.
    pub fn forward(&mut self) {
        let duration = self.transport.duration();
        if !duration.is_finite() || duration <= 0.0 {
            log::debug!("Ignoring forward seek: duration unknown ({})", duration);
            return;
        }
        let target = (self.transport.position() + self.seek_step()).min(duration);
        self.transport.set_position(target);
    }

    /// Run the handler for one action.
    pub fn perform(&mut self, action: Action) {
        match action {
            Action::PlayPause => self.toggle_play(),
            Action::Rewind => self.rewind(),
            Action::Forward => self.forward(),
        }
    }
}

impl<T: MediaTransport + 'static> PlaybackController<T> {
    /// Register the controller as the handler for every action.
    pub fn install(controller: &Rc<RefCell<Self>>, engine: &mut ShortcutEngine) {
        for action in Action::ALL {
            let controller = Rc::clone(controller);
            engine.on_action(action, move || controller.borrow_mut().perform(action));
        }
    }
}
