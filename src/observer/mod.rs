//! Listener registration layered on top of machine hooks.
//!
//! The transition engine only knows that it has to "notify subscribers".
//! [`Observers`] is that capability: listeners subscribe with a closure and
//! get back a [`Subscription`] handle that removes them again.
//!
//! # Example
//!
//! ```rust
//! use statecraft::observer::Observers;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let observers: Observers<u32> = Observers::new();
//! let total = Rc::new(Cell::new(0u32));
//!
//! let sink = Rc::clone(&total);
//! let subscription = observers.subscribe(move |value: &u32| sink.set(sink.get() + value));
//!
//! observers.notify(&5);
//! assert!(observers.unsubscribe(subscription));
//! observers.notify(&5);
//!
//! assert_eq!(total.get(), 5);
//! ```

mod callback;

pub use callback::{CallbackStackState, CallbackState};

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SUBSCRIPTION: AtomicU64 = AtomicU64::new(0);

/// Handle returned by [`Observers::subscribe`].
///
/// Handles are unique across every registry in the process, so removing a
/// handle from the wrong registry is a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

impl Subscription {
    fn next() -> Self {
        Self(NEXT_SUBSCRIPTION.fetch_add(1, Ordering::Relaxed))
    }
}

type Listener<E> = Rc<dyn Fn(&E)>;

/// Ordered list of listeners for events of type `E`.
///
/// Listeners run in subscription order. A notification delivers to the
/// listeners registered when it started; listeners added or removed while it
/// runs take effect from the next notification.
pub struct Observers<E> {
    listeners: RefCell<Vec<(Subscription, Listener<E>)>>,
}

impl<E> Observers<E> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Register a listener.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&E) + 'static,
    {
        let id = Subscription::next();
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was already removed.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != subscription);
        listeners.len() != before
    }

    /// Deliver an event to every listener.
    pub fn notify(&self, event: &E) {
        let snapshot: Vec<Listener<E>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in snapshot {
            listener(event);
        }
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }

    /// Remove every listener.
    pub fn clear(&self) {
        self.listeners.borrow_mut().clear();
    }
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("listeners", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn recorder() -> (Rc<RefCell<Vec<String>>>, Observers<&'static str>) {
        (Rc::new(RefCell::new(Vec::new())), Observers::new())
    }

    #[test]
    fn new_observers_are_empty() {
        let observers: Observers<()> = Observers::new();
        assert!(observers.is_empty());
        assert_eq!(observers.len(), 0);
    }

    #[test]
    fn listeners_run_in_subscription_order() {
        let (log, observers) = recorder();

        for tag in ["first", "second", "third"] {
            let log = Rc::clone(&log);
            observers.subscribe(move |event| log.borrow_mut().push(format!("{tag}:{event}")));
        }

        observers.notify(&"ping");

        assert_eq!(
            *log.borrow(),
            vec!["first:ping", "second:ping", "third:ping"]
        );
    }

    #[test]
    fn unsubscribe_removes_only_that_listener() {
        let (log, observers) = recorder();

        let a = {
            let log = Rc::clone(&log);
            observers.subscribe(move |_| log.borrow_mut().push("a".to_string()))
        };
        {
            let log = Rc::clone(&log);
            observers.subscribe(move |_| log.borrow_mut().push("b".to_string()));
        }

        assert!(observers.unsubscribe(a));
        assert!(!observers.unsubscribe(a));
        observers.notify(&"x");

        assert_eq!(*log.borrow(), vec!["b"]);
        assert_eq!(observers.len(), 1);
    }

    #[test]
    fn subscriptions_are_unique() {
        let observers: Observers<()> = Observers::new();
        let a = observers.subscribe(|_| {});
        let b = observers.subscribe(|_| {});
        assert_ne!(a, b);
    }

    #[test]
    fn foreign_subscription_is_ignored() {
        let first: Observers<()> = Observers::new();
        let second: Observers<()> = Observers::new();
        let handle = first.subscribe(|_| {});
        second.subscribe(|_| {});

        assert!(!second.unsubscribe(handle));
        assert_eq!(second.len(), 1);
        assert!(first.unsubscribe(handle));
    }

    #[test]
    fn subscribing_during_notify_applies_next_time() {
        let observers: Rc<Observers<()>> = Rc::new(Observers::new());
        let calls = Rc::new(Cell::new(0));

        {
            let inner = Rc::downgrade(&observers);
            let calls = Rc::clone(&calls);
            observers.subscribe(move |_| {
                if let Some(observers) = inner.upgrade() {
                    let calls = Rc::clone(&calls);
                    observers.subscribe(move |_| calls.set(calls.get() + 1));
                }
            });
        }

        observers.notify(&());
        assert_eq!(calls.get(), 0);
        assert_eq!(observers.len(), 2);

        observers.notify(&());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn clear_removes_everything() {
        let observers: Observers<()> = Observers::new();
        observers.subscribe(|_| {});
        observers.subscribe(|_| {});
        observers.clear();
        assert!(observers.is_empty());
    }
}
