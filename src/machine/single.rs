//! Single-slot state machine.

use crate::config::{MachineConfig, ReentrancyCheck};
use crate::core::{State, StateTimer, TransitionGuard};
use crate::observer::{Observers, Subscription};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Notification sent after every [`StateMachine::set_state`].
pub struct StateChange<S: ?Sized> {
    /// The state that was active before the transition
    pub previous: Option<Rc<S>>,
    /// The state that is active now
    pub current: Option<Rc<S>>,
}

impl<S: ?Sized> Clone for StateChange<S> {
    fn clone(&self) -> Self {
        Self {
            previous: self.previous.clone(),
            current: self.current.clone(),
        }
    }
}

impl<S: ?Sized + State> fmt::Debug for StateChange<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateChange")
            .field("previous", &self.previous.as_deref().map(|s| s.name()))
            .field("current", &self.current.as_deref().map(|s| s.name()))
            .finish()
    }
}

/// State machine with at most one active state.
///
/// The machine tracks which state is active and how long it has been
/// active. Assigning a state exits the old one, resets the timer and enters
/// the new one. The machine is itself a [`State`], so it can be nested inside
/// another machine.
///
/// # Example
///
/// ```rust
/// use statecraft::core::State;
/// use statecraft::machine::StateMachine;
/// use std::rc::Rc;
/// use std::time::Duration;
///
/// struct Idle;
/// impl State for Idle {}
///
/// let machine: StateMachine<dyn State> = StateMachine::new();
/// machine.set_state(Some(Rc::new(Idle)));
///
/// machine.update(Duration::from_millis(16));
/// assert_eq!(machine.elapsed(), Duration::from_millis(16));
/// assert!(machine.has_state());
/// ```
pub struct StateMachine<S: ?Sized> {
    current: RefCell<Option<Rc<S>>>,
    timer: StateTimer,
    guard: TransitionGuard,
    changed: Observers<StateChange<S>>,
    enter_hook: Option<Box<dyn Fn(&StateMachine<S>)>>,
    exit_hook: Option<Box<dyn Fn(&StateMachine<S>)>>,
}

impl<S: ?Sized + State> StateMachine<S> {
    /// Create an empty machine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(&MachineConfig::default())
    }

    /// Create an empty machine with the given configuration.
    pub fn with_config(config: &MachineConfig) -> Self {
        Self {
            current: RefCell::new(None),
            timer: StateTimer::new(),
            guard: TransitionGuard::new(config.reentrancy_check),
            changed: Observers::new(),
            enter_hook: None,
            exit_hook: None,
        }
    }

    pub(crate) fn set_nesting_hooks(
        &mut self,
        enter: Option<Box<dyn Fn(&StateMachine<S>)>>,
        exit: Option<Box<dyn Fn(&StateMachine<S>)>>,
    ) {
        self.enter_hook = enter;
        self.exit_hook = exit;
    }

    /// Get the active state, if any.
    pub fn current_state(&self) -> Option<Rc<S>> {
        self.current.borrow().clone()
    }

    /// Whether a state is active.
    pub fn has_state(&self) -> bool {
        self.current.borrow().is_some()
    }

    /// Time spent in the active state since the last transition.
    pub fn elapsed(&self) -> Duration {
        self.timer.elapsed()
    }

    /// [`elapsed`](Self::elapsed) in seconds.
    pub fn elapsed_secs(&self) -> f32 {
        self.timer.elapsed_secs()
    }

    /// [`elapsed`](Self::elapsed) in seconds, double precision.
    pub fn elapsed_secs_f64(&self) -> f64 {
        self.timer.elapsed_secs_f64()
    }

    /// The reentrancy policy this machine was built with.
    pub fn reentrancy_check(&self) -> ReentrancyCheck {
        self.guard.check()
    }

    /// Whether a transition is running right now.
    pub fn is_transitioning(&self) -> bool {
        self.guard.is_active()
    }

    /// Replace the active state.
    ///
    /// Exits the current state, swaps in `state`, resets the elapsed time,
    /// enters `state` and finally notifies state-change observers. Passing
    /// `None` deactivates the machine. Assigning the state that is already
    /// active still runs a full exit and enter.
    ///
    /// Returns the previously active state.
    ///
    /// # Panics
    ///
    /// If called from an enter, exit or observer callback of a transition on
    /// this machine while the reentrancy check is enforced. The nested call
    /// changes nothing before it panics.
    #[track_caller]
    pub fn set_state(&self, state: Option<Rc<S>>) -> Option<Rc<S>> {
        let _transition = self.guard.acquire("set_state");

        let previous = self.current_state();
        if let Some(previous) = &previous {
            previous.on_exit();
        }

        self.current.replace(state.clone());
        self.timer.reset();

        if let Some(state) = &state {
            state.on_enter();
        }

        tracing::trace!(
            from = ?previous.as_deref().map(|s| s.name()),
            to = ?state.as_deref().map(|s| s.name()),
            "state changed"
        );

        self.changed.notify(&StateChange {
            previous: previous.clone(),
            current: state,
        });

        previous
    }

    /// Deactivate the machine. Same as `set_state(None)`.
    #[track_caller]
    pub fn clear_state(&self) -> Option<Rc<S>> {
        self.set_state(None)
    }

    /// Advance the elapsed time and forward the tick to the active state.
    ///
    /// Does nothing beyond the timer when no state is active.
    pub fn update(&self, delta_time: Duration) {
        self.timer.advance(delta_time);
        if let Some(state) = self.current_state() {
            state.on_update(delta_time);
        }
    }

    /// Subscribe to state changes.
    ///
    /// Listeners run inside the transition, so they must not call
    /// [`set_state`](Self::set_state) on this machine.
    pub fn on_state_changed<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&StateChange<S>) + 'static,
    {
        self.changed.subscribe(listener)
    }

    /// Remove a state-change listener. Returns `false` if it was not
    /// registered here.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.changed.unsubscribe(subscription)
    }
}

impl<S: ?Sized + State> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// A machine nested in another machine forwards ticks to its active state.
/// Enter and exit run the hooks given to
/// [`StateMachineBuilder::on_entered`](crate::builder::StateMachineBuilder::on_entered)
/// and [`on_exited`](crate::builder::StateMachineBuilder::on_exited), if any.
impl<S: ?Sized + State> State for StateMachine<S> {
    fn on_enter(&self) {
        if let Some(hook) = &self.enter_hook {
            hook(self);
        }
    }

    fn on_exit(&self) {
        if let Some(hook) = &self.exit_hook {
            hook(self);
        }
    }

    fn on_update(&self, delta_time: Duration) {
        self.update(delta_time);
    }
}

impl<S: ?Sized + State> fmt::Debug for StateMachine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let current = self.current.borrow();
        f.debug_struct("StateMachine")
            .field("current", &current.as_deref().map(|s| s.name()))
            .field("elapsed", &self.timer.elapsed())
            .field("reentrancy_check", &self.guard.check())
            .finish()
    }
}
