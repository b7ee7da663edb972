//! Reentrancy guard for transitions.
//!
//! A machine holds one [`TransitionGuard`] and acquires it around the whole
//! body of every transition. Acquiring it while it is already held means a
//! state or observer tried to change the machine from inside a callback of
//! the transition that is still running. That is a bug in the caller, so the
//! guard panics instead of returning an error, the same way `RefCell` panics
//! on a conflicting borrow.

use crate::config::ReentrancyCheck;
use std::cell::Cell;

/// In-progress flag checked and set around a transition.
///
/// # Example
///
/// ```rust
/// use statecraft::config::ReentrancyCheck;
/// use statecraft::core::TransitionGuard;
///
/// let guard = TransitionGuard::new(ReentrancyCheck::Enforced);
///
/// let held = guard.acquire("push");
/// assert!(guard.is_active());
///
/// drop(held);
/// assert!(!guard.is_active());
/// guard.ensure_idle("pop");
/// ```
#[derive(Debug)]
pub struct TransitionGuard {
    active: Cell<bool>,
    check: ReentrancyCheck,
}

impl TransitionGuard {
    /// Create an idle guard applying `check`.
    pub fn new(check: ReentrancyCheck) -> Self {
        Self {
            active: Cell::new(false),
            check,
        }
    }

    /// The policy this guard applies.
    pub fn check(&self) -> ReentrancyCheck {
        self.check
    }

    /// Whether a transition is currently running.
    ///
    /// Always `false` when the policy is not enforced in this build.
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Assert that no transition is running.
    ///
    /// Does not acquire the guard. Used by operations that must reject
    /// reentrancy before their own preconditions are evaluated.
    ///
    /// # Panics
    ///
    /// If the policy is enforced in this build and a transition is running.
    #[track_caller]
    pub fn ensure_idle(&self, operation: &'static str) {
        if self.check.is_enforced() && self.active.get() {
            tracing::error!(operation, "transition requested from inside a transition callback");
            panic!(
                "cannot {operation} while a transition is in progress on the same machine \
                 (called from an enter, exit or observer callback)"
            );
        }
    }

    /// Mark a transition as running until the returned token is dropped.
    ///
    /// # Panics
    ///
    /// Same as [`ensure_idle`](Self::ensure_idle).
    #[track_caller]
    pub fn acquire(&self, operation: &'static str) -> GuardToken<'_> {
        self.ensure_idle(operation);
        let enforced = self.check.is_enforced();
        if enforced {
            self.active.set(true);
        }
        GuardToken {
            guard: self,
            enforced,
        }
    }
}

impl Default for TransitionGuard {
    fn default() -> Self {
        Self::new(ReentrancyCheck::default())
    }
}

/// Releases the guard when dropped, including during unwinding.
#[must_use = "the guard is released as soon as the token is dropped"]
#[derive(Debug)]
pub struct GuardToken<'a> {
    guard: &'a TransitionGuard,
    enforced: bool,
}

impl Drop for GuardToken<'_> {
    fn drop(&mut self) {
        if self.enforced {
            self.guard.active.set(false);
        }
    }
}

/// Run `f`, expecting it to panic, and return the panic message.
#[cfg(test)]
pub(crate) fn panic_message(f: impl FnOnce()) -> String {
    let payload = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f))
        .err()
        .expect("expected a panic");
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => payload
            .downcast_ref::<&str>()
            .map(|message| message.to_string())
            .unwrap_or_default(),
    }
}
