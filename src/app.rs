//! Application wiring.
//!
//! [`App`] owns the two stores, the shortcut engine and the playback
//! controller, shared on the UI thread through `Rc<RefCell<_>>`.

use crate::playback::{MediaTransport, PlaybackController};
use listening_trainer_config::{FileStore, KeyValueStore, SettingsStore, ShortcutStore};
use listening_trainer_keybindings::{
    FocusContext, HandleOutcome, KeyEventSource, KeyInput, ListenerRegistration, ShortcutEngine,
};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Main application state
pub struct App<T: MediaTransport> {
    engine: Rc<RefCell<ShortcutEngine>>,
    settings: Rc<RefCell<SettingsStore>>,
    playback: Rc<RefCell<PlaybackController<T>>>,
}

impl<T: MediaTransport + 'static> App<T> {
    /// Build the application on top of one persistence backend.
    ///
    /// Both stores load their records immediately; missing or corrupt
    /// records fall back to the defaults.
    pub fn open<B>(backend: B, transport: T) -> Self
    where
        B: KeyValueStore + Clone + 'static,
    {
        let shortcuts = ShortcutStore::open(Box::new(backend.clone()));
        let settings = Rc::new(RefCell::new(SettingsStore::open(Box::new(backend))));

        let mut engine = ShortcutEngine::new(shortcuts);
        let playback = Rc::new(RefCell::new(PlaybackController::new(
            transport,
            Rc::clone(&settings),
        )));
        PlaybackController::install(&playback, &mut engine);

        log::info!(
            "App ready: {} shortcut(s), seek step {}s",
            engine.store().config().iter().count(),
            settings.borrow().settings().seek_seconds
        );

        Self {
            engine: Rc::new(RefCell::new(engine)),
            settings,
            playback,
        }
    }

    /// Build the application with records stored under `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>, transport: T) -> Self {
        Self::open(FileStore::new(dir), transport)
    }

    /// Build the application with records in the per-user config directory.
    pub fn in_config_dir(transport: T) -> Self {
        Self::open(FileStore::in_config_dir(), transport)
    }

    pub fn engine(&self) -> &Rc<RefCell<ShortcutEngine>> {
        &self.engine
    }

    pub fn settings(&self) -> &Rc<RefCell<SettingsStore>> {
        &self.settings
    }

    pub fn playback(&self) -> &Rc<RefCell<PlaybackController<T>>> {
        &self.playback
    }

    /// Feed one key press to the engine.
    ///
    /// A key arriving while the engine is already handling one is dropped.
    pub fn handle_key(&self, input: &KeyInput, focus: FocusContext) -> HandleOutcome {
        match self.engine.try_borrow_mut() {
            Ok(mut engine) => engine.handle(input, focus),
            Err(_) => {
                log::warn!("Shortcut engine busy, dropping key {}", input.code);
                HandleOutcome::Unhandled
            }
        }
    }

    /// Subscribe the engine to a key event source for as long as the
    /// returned registration lives.
    pub fn attach<S: KeyEventSource>(&self, source: &Rc<S>) -> ListenerRegistration<S> {
        ShortcutEngine::attach(&self.engine, source)
    }
}
