//! Stack-based (pushdown) state machine.

use crate::config::{MachineConfig, ReentrancyCheck};
use crate::core::{StackAction, StackState, StateTimer, TransitionGuard};
use crate::machine::error::MachineError;
use crate::observer::{Observers, Subscription};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// State machine holding an ordered stack of states.
///
/// Only the top of the stack is active. Pushing suspends the current top
/// (exit with [`StackAction::Push`]) and enters the new one; popping removes
/// the top (exit with [`StackAction::Pop`]) and resumes the state beneath it
/// (enter with [`StackAction::Pop`]).
///
/// Popped states are handed back to the caller; the machine never destroys
/// them.
///
/// # Example
///
/// ```rust
/// use statecraft::core::StackState;
/// use statecraft::machine::StackStateMachine;
/// use std::rc::Rc;
///
/// struct Screen(&'static str);
/// impl StackState for Screen {
///     fn name(&self) -> &str {
///         self.0
///     }
/// }
///
/// let machine: StackStateMachine<dyn StackState> = StackStateMachine::new();
/// machine.push(Rc::new(Screen("title")));
/// machine.push(Rc::new(Screen("options")));
///
/// assert_eq!(machine.len(), 2);
/// assert_eq!(machine.current_state().unwrap().name(), "options");
/// assert_eq!(machine.under_state().unwrap().name(), "title");
///
/// let popped = machine.pop().unwrap();
/// assert_eq!(popped.name(), "options");
/// assert_eq!(machine.len(), 1);
/// ```
pub struct StackStateMachine<S: ?Sized> {
    stack: RefCell<Vec<Rc<S>>>,
    timer: StateTimer,
    guard: TransitionGuard,
    pushed: Observers<Rc<S>>,
    popped: Observers<Rc<S>>,
    enter_hook: Option<Box<dyn Fn(&StackStateMachine<S>, StackAction)>>,
    exit_hook: Option<Box<dyn Fn(&StackStateMachine<S>, StackAction)>>,
}

impl<S: ?Sized + StackState> StackStateMachine<S> {
    /// Create an empty machine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(&MachineConfig::default())
    }

    /// Create an empty machine with the given configuration.
    pub fn with_config(config: &MachineConfig) -> Self {
        Self {
            stack: RefCell::new(Vec::with_capacity(config.stack_capacity)),
            timer: StateTimer::new(),
            guard: TransitionGuard::new(config.reentrancy_check),
            pushed: Observers::new(),
            popped: Observers::new(),
            enter_hook: None,
            exit_hook: None,
        }
    }

    pub(crate) fn set_nesting_hooks(
        &mut self,
        enter: Option<Box<dyn Fn(&StackStateMachine<S>, StackAction)>>,
        exit: Option<Box<dyn Fn(&StackStateMachine<S>, StackAction)>>,
    ) {
        self.enter_hook = enter;
        self.exit_hook = exit;
    }

    /// Number of states on the stack.
    pub fn len(&self) -> usize {
        self.stack.borrow().len()
    }

    /// Whether the stack holds no states.
    pub fn is_empty(&self) -> bool {
        self.stack.borrow().is_empty()
    }

    /// Get the state at `index`, counting from the bottom of the stack.
    ///
    /// # Errors
    ///
    /// [`MachineError::OutOfRange`] if `index >= len()`.
    pub fn state(&self, index: usize) -> Result<Rc<S>, MachineError> {
        let stack = self.stack.borrow();
        stack.get(index).cloned().ok_or_else(|| {
            tracing::debug!(index, depth = stack.len(), "state index out of range");
            MachineError::OutOfRange {
                index,
                depth: stack.len(),
            }
        })
    }

    /// Get the top of the stack.
    ///
    /// # Errors
    ///
    /// [`MachineError::StackTooShallow`] if the stack is empty.
    pub fn current_state(&self) -> Result<Rc<S>, MachineError> {
        self.state_from_top(0)
    }

    /// Get the state directly beneath the top.
    ///
    /// # Errors
    ///
    /// [`MachineError::StackTooShallow`] if the stack holds fewer than two
    /// states.
    pub fn under_state(&self) -> Result<Rc<S>, MachineError> {
        self.state_from_top(1)
    }

    /// Snapshot of the stack, bottom first.
    pub fn states(&self) -> Vec<Rc<S>> {
        self.stack.borrow().clone()
    }

    /// Time spent in the top state since the last push or pop.
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

    /// Whether a push or pop is running right now.
    pub fn is_transitioning(&self) -> bool {
        self.guard.is_active()
    }

    /// Push a state on top of the stack.
    ///
    /// The current top (if any) exits with [`StackAction::Push`], the elapsed
    /// time resets, `state` is appended and entered with
    /// [`StackAction::Push`], then push observers are notified.
    ///
    /// # Panics
    ///
    /// If called from an enter, exit or observer callback of a push or pop on
    /// this machine while the reentrancy check is enforced. The nested call
    /// changes nothing before it panics.
    #[track_caller]
    pub fn push(&self, state: Rc<S>) {
        let _transition = self.guard.acquire("push");

        let suspended = self.stack.borrow().last().cloned();
        if let Some(suspended) = &suspended {
            suspended.on_exit(StackAction::Push);
        }

        self.timer.reset();
        self.stack.borrow_mut().push(Rc::clone(&state));

        state.on_enter(StackAction::Push);

        tracing::trace!(
            state = state.name(),
            suspended = ?suspended.as_deref().map(|s| s.name()),
            depth = self.len(),
            "state pushed"
        );

        self.pushed.notify(&state);
    }

    /// Pop the top state and return it.
    ///
    /// The top exits with [`StackAction::Pop`] and is removed, the elapsed
    /// time resets, the new top (if any) is entered with
    /// [`StackAction::Pop`], then pop observers are notified.
    ///
    /// # Errors
    ///
    /// [`MachineError::EmptyStack`] if there is nothing to pop. Nothing is
    /// changed in that case.
    ///
    /// # Panics
    ///
    /// If called from inside a push or pop on this machine while the
    /// reentrancy check is enforced.
    #[track_caller]
    pub fn pop(&self) -> Result<Rc<S>, MachineError> {
        let _transition = self.guard.acquire("pop");

        let Some(popped) = self.stack.borrow().last().cloned() else {
            tracing::debug!("pop on empty state stack");
            return Err(MachineError::EmptyStack);
        };

        popped.on_exit(StackAction::Pop);

        self.stack.borrow_mut().pop();
        self.timer.reset();

        let resumed = self.stack.borrow().last().cloned();
        if let Some(resumed) = &resumed {
            resumed.on_enter(StackAction::Pop);
        }

        tracing::trace!(
            state = popped.name(),
            resumed = ?resumed.as_deref().map(|s| s.name()),
            depth = self.len(),
            "state popped"
        );

        self.popped.notify(&popped);
        Ok(popped)
    }

    /// Pop `count` states, top first, returning them in pop order.
    ///
    /// Each pop runs the full pop protocol, so every state uncovered along
    /// the way is resumed and then exited again.
    ///
    /// # Errors
    ///
    /// [`MachineError::InsufficientDepth`] if `count` exceeds the stack
    /// depth. Checked before the first pop.
    ///
    /// # Panics
    ///
    /// If called from inside a push or pop on this machine while the
    /// reentrancy check is enforced.
    #[track_caller]
    pub fn pop_count(&self, count: usize) -> Result<Vec<Rc<S>>, MachineError> {
        self.guard.ensure_idle("pop_count");

        let depth = self.len();
        if count > depth {
            tracing::debug!(requested = count, depth, "batch pop deeper than stack");
            return Err(MachineError::InsufficientDepth {
                requested: count,
                depth,
            });
        }

        let mut popped = Vec::with_capacity(count);
        for _ in 0..count {
            popped.push(self.pop()?);
        }
        Ok(popped)
    }

    /// Pop every state, top first, returning them in pop order.
    ///
    /// # Panics
    ///
    /// If called from inside a push or pop on this machine while the
    /// reentrancy check is enforced.
    #[track_caller]
    pub fn pop_all(&self) -> Vec<Rc<S>> {
        self.guard.ensure_idle("pop_all");

        let mut popped = Vec::with_capacity(self.len());
        while let Ok(state) = self.pop() {
            popped.push(state);
        }
        popped
    }

    /// Advance the elapsed time and forward the tick to the top state.
    ///
    /// Does nothing beyond the timer when the stack is empty. The top state
    /// may push or pop from its own `on_update`.
    pub fn update(&self, delta_time: Duration) {
        self.timer.advance(delta_time);
        let top = self.stack.borrow().last().cloned();
        if let Some(top) = top {
            top.on_update(delta_time);
        }
    }

    /// Subscribe to pushes. The listener receives the pushed state.
    ///
    /// Listeners run inside the transition, so they must not push or pop on
    /// this machine.
    pub fn on_state_pushed<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Rc<S>) + 'static,
    {
        self.pushed.subscribe(listener)
    }

    /// Subscribe to pops. The listener receives the popped state.
    pub fn on_state_popped<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Rc<S>) + 'static,
    {
        self.popped.subscribe(listener)
    }

    /// Remove a push or pop listener.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.pushed.unsubscribe(subscription) || self.popped.unsubscribe(subscription)
    }

    fn state_from_top(&self, offset: usize) -> Result<Rc<S>, MachineError> {
        let required = offset + 1;
        let depth = self.len();
        match depth.checked_sub(required) {
            Some(index) => self.state(index),
            None => {
                tracing::debug!(required, depth, "state stack too shallow");
                Err(MachineError::StackTooShallow { required, depth })
            }
        }
    }
}

impl<S: ?Sized + StackState> Default for StackStateMachine<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// A stack machine nested in another stack machine forwards ticks to its
/// top state. Enter and exit run the hooks given to
/// [`StackStateMachineBuilder::on_entered`](crate::builder::StackStateMachineBuilder::on_entered)
/// and [`on_exited`](crate::builder::StackStateMachineBuilder::on_exited), if any.
impl<S: ?Sized + StackState> StackState for StackStateMachine<S> {
    fn on_enter(&self, action: StackAction) {
        if let Some(hook) = &self.enter_hook {
            hook(self, action);
        }
    }

    fn on_exit(&self, action: StackAction) {
        if let Some(hook) = &self.exit_hook {
            hook(self, action);
        }
    }

    fn on_update(&self, delta_time: Duration) {
        self.update(delta_time);
    }
}

impl<S: ?Sized + StackState> fmt::Debug for StackStateMachine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stack = self.stack.borrow();
        let names: Vec<&str> = stack.iter().map(|s| s.name()).collect();
        f.debug_struct("StackStateMachine")
            .field("stack", &names)
            .field("elapsed", &self.timer.elapsed())
            .field("reentrancy_check", &self.guard.check())
            .finish()
    }
}
