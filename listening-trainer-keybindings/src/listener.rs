//! Wiring the engine to a platform key event stream.
//!
//! The host owns a [`KeyEventSource`]; [`ShortcutEngine::attach`] subscribes
//! the engine and returns a [`ListenerRegistration`]. The listener stays
//! attached for as long as the registration is alive and is removed when it
//! is dropped, on every exit path.

use crate::codec::KeyInput;
use crate::engine::ShortcutEngine;
use crate::matcher::FocusContext;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Identifies one listener on a [`KeyEventSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Callback receiving key presses. Returns true if the platform's default
/// behavior for the event should be suppressed.
pub type KeyListener = Box<dyn FnMut(&KeyInput, FocusContext) -> bool>;

/// A stream of key presses that listeners can be attached to.
pub trait KeyEventSource {
    fn add_listener(&self, listener: KeyListener) -> ListenerId;

    /// Returns false if `id` was not attached.
    fn remove_listener(&self, id: ListenerId) -> bool;
}

/// Single-threaded fan-out of key presses to attached listeners.
#[derive(Default)]
pub struct KeyEventHub {
    listeners: RefCell<Vec<(ListenerId, Rc<RefCell<KeyListener>>)>>,
    next_id: Cell<u64>,
}

impl fmt::Debug for KeyEventHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyEventHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl KeyEventHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Deliver one key press to every listener, in attachment order.
    ///
    /// Returns true if any listener asked to suppress the default behavior.
    pub fn dispatch(&self, input: &KeyInput, focus: FocusContext) -> bool {
        // Snapshot so listeners may attach/detach while being called
        let listeners: Vec<_> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        let mut suppress = false;
        for listener in listeners {
            match listener.try_borrow_mut() {
                Ok(mut callback) => {
                    let callback = &mut *callback;
                    suppress |= callback(input, focus);
                }
                Err(_) => log::warn!("Skipping re-entrant key listener for {}", input.code),
            }
        }
        suppress
    }
}

impl KeyEventSource for KeyEventHub {
    fn add_listener(&self, listener: KeyListener) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(listener))));
        id
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }
}

/// Keeps a listener attached; detaches it when dropped.
pub struct ListenerRegistration<S: KeyEventSource> {
    source: Rc<S>,
    id: Option<ListenerId>,
}

impl<S: KeyEventSource> fmt::Debug for ListenerRegistration<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistration")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl<S: KeyEventSource> ListenerRegistration<S> {
    /// Attach `listener` to `source`.
    pub fn attach(source: &Rc<S>, listener: KeyListener) -> Self {
        let id = source.add_listener(listener);
        log::debug!("Attached key listener {:?}", id);
        Self {
            source: Rc::clone(source),
            id: Some(id),
        }
    }

    pub fn id(&self) -> Option<ListenerId> {
        self.id
    }

    /// Detach now instead of waiting for drop.
    pub fn detach(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(id) = self.id.take() {
            if self.source.remove_listener(id) {
                log::debug!("Detached key listener {:?}", id);
            } else {
                log::warn!("Key listener {:?} was already detached", id);
            }
        }
    }
}

impl<S: KeyEventSource> Drop for ListenerRegistration<S> {
    fn drop(&mut self) {
        self.release();
    }
}

impl ShortcutEngine {
    /// Subscribe a shared engine to `source`.
    ///
    /// The listener holds only a weak reference, so the registration does
    /// not keep the engine alive. Events arriving while the engine is already
    /// borrowed (a handler feeding a key back in) are dropped with a warning.
    pub fn attach<S: KeyEventSource>(
        engine: &Rc<RefCell<ShortcutEngine>>,
        source: &Rc<S>,
    ) -> ListenerRegistration<S> {
        let weak = Rc::downgrade(engine);
        let listener: KeyListener = Box::new(move |input: &KeyInput, focus: FocusContext| {
            let Some(engine) = weak.upgrade() else {
                return false;
            };
            match engine.try_borrow_mut() {
                Ok(mut engine) => engine.handle(input, focus).suppress_default(),
                Err(_) => {
                    log::warn!("Shortcut engine busy, dropping key {}", input.code);
                    false
                }
            }
        });
        ListenerRegistration::attach(source, listener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use listening_trainer_config::{Action, MemoryStore, ShortcutStore};

    fn shared_engine() -> Rc<RefCell<ShortcutEngine>> {
        Rc::new(RefCell::new(ShortcutEngine::new(ShortcutStore::open(
            Box::new(MemoryStore::new()),
        ))))
    }

    #[test]
    fn test_registration_detaches_on_drop() {
        let hub = Rc::new(KeyEventHub::new());
        let engine = shared_engine();
        let hits = Rc::new(Cell::new(0));
        {
            let hits = Rc::clone(&hits);
            engine
                .borrow_mut()
                .on_action(Action::PlayPause, move || hits.set(hits.get() + 1));
        }

        {
            let _registration = ShortcutEngine::attach(&engine, &hub);
            assert_eq!(hub.listener_count(), 1);
            assert!(hub.dispatch(&KeyInput::plain("Space"), FocusContext::NonEditable));
        }

        assert_eq!(hub.listener_count(), 0);
        assert!(!hub.dispatch(&KeyInput::plain("Space"), FocusContext::NonEditable));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_explicit_detach() {
        let hub = Rc::new(KeyEventHub::new());
        let engine = shared_engine();
        let registration = ShortcutEngine::attach(&engine, &hub);
        assert!(registration.id().is_some());
        registration.detach();
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn test_unhandled_does_not_suppress() {
        let hub = Rc::new(KeyEventHub::new());
        let engine = shared_engine();
        let _registration = ShortcutEngine::attach(&engine, &hub);
        assert!(!hub.dispatch(&KeyInput::plain("KeyQ"), FocusContext::NonEditable));
    }

    #[test]
    fn test_dropped_engine_is_inert() {
        let hub = Rc::new(KeyEventHub::new());
        let engine = shared_engine();
        let _registration = ShortcutEngine::attach(&engine, &hub);
        drop(engine);
        assert!(!hub.dispatch(&KeyInput::plain("Space"), FocusContext::NonEditable));
    }

    #[test]
    fn test_busy_engine_drops_event() {
        let hub = Rc::new(KeyEventHub::new());
        let engine = shared_engine();
        let _registration = ShortcutEngine::attach(&engine, &hub);
        let _held = engine.borrow_mut();
        assert!(!hub.dispatch(&KeyInput::plain("Space"), FocusContext::NonEditable));
    }
}
