//! Change notification for the persisted stores.
//!
//! Callbacks are invoked synchronously, in subscription order, after every
//! successful change.

use std::fmt;

/// Handle returned by `subscribe`, used to remove the callback again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<T> = Box<dyn Fn(&T)>;

/// Ordered list of change callbacks for a value of type `T`.
pub(crate) struct Observers<T> {
    callbacks: Vec<(SubscriptionId, Callback<T>)>,
    next_id: u64,
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self {
            callbacks: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> fmt::Debug for Observers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}

impl<T> Observers<T> {
    pub(crate) fn subscribe(&mut self, callback: impl Fn(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Returns true if a callback with `id` was registered.
    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(existing, _)| *existing != id);
        self.callbacks.len() != before
    }

    pub(crate) fn notify(&self, value: &T) {
        for (_, callback) in &self.callbacks {
            callback(value);
        }
    }
}
