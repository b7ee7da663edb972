//! Ready-made states whose callbacks are listener lists.
//!
//! Useful when the behavior of a state is assembled at runtime instead of
//! being written as a dedicated type.

use crate::core::{StackAction, StackState, State};
use crate::observer::Observers;
use std::fmt;
use std::time::Duration;

/// [`State`] that forwards enter, exit and update to subscribers.
///
/// # Example
///
/// ```rust
/// use statecraft::core::State;
/// use statecraft::machine::StateMachine;
/// use statecraft::observer::CallbackState;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let entered = Rc::new(Cell::new(false));
/// let state = Rc::new(CallbackState::new("idle"));
/// {
///     let entered = Rc::clone(&entered);
///     state.entered().subscribe(move |_| entered.set(true));
/// }
///
/// let machine: StateMachine<dyn State> = StateMachine::new();
/// machine.set_state(Some(state));
/// assert!(entered.get());
/// ```
pub struct CallbackState {
    name: String,
    entered: Observers<()>,
    exited: Observers<()>,
    updated: Observers<Duration>,
}

impl CallbackState {
    /// Create a state with no listeners.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entered: Observers::new(),
            exited: Observers::new(),
            updated: Observers::new(),
        }
    }

    /// Listeners run when the state is entered.
    pub fn entered(&self) -> &Observers<()> {
        &self.entered
    }

    /// Listeners run when the state is exited.
    pub fn exited(&self) -> &Observers<()> {
        &self.exited
    }

    /// Listeners run on every tick with the tick's delta time.
    pub fn updated(&self) -> &Observers<Duration> {
        &self.updated
    }
}

impl State for CallbackState {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_enter(&self) {
        self.entered.notify(&());
    }

    fn on_exit(&self) {
        self.exited.notify(&());
    }

    fn on_update(&self, delta_time: Duration) {
        self.updated.notify(&delta_time);
    }
}

impl fmt::Debug for CallbackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackState")
            .field("name", &self.name)
            .field("entered", &self.entered)
            .field("exited", &self.exited)
            .field("updated", &self.updated)
            .finish()
    }
}

/// [`StackState`] that forwards enter, exit and update to subscribers.
///
/// Enter and exit listeners receive the [`StackAction`] of the transition.
pub struct CallbackStackState {
    name: String,
    entered: Observers<StackAction>,
    exited: Observers<StackAction>,
    updated: Observers<Duration>,
}

impl CallbackStackState {
    /// Create a state with no listeners.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entered: Observers::new(),
            exited: Observers::new(),
            updated: Observers::new(),
        }
    }

    /// Listeners run when the state is pushed or resumed.
    pub fn entered(&self) -> &Observers<StackAction> {
        &self.entered
    }

    /// Listeners run when the state is covered or popped.
    pub fn exited(&self) -> &Observers<StackAction> {
        &self.exited
    }

    /// Listeners run on every tick while the state is on top.
    pub fn updated(&self) -> &Observers<Duration> {
        &self.updated
    }
}

impl StackState for CallbackStackState {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_enter(&self, action: StackAction) {
        self.entered.notify(&action);
    }

    fn on_exit(&self, action: StackAction) {
        self.exited.notify(&action);
    }

    fn on_update(&self, delta_time: Duration) {
        self.updated.notify(&delta_time);
    }
}

impl fmt::Debug for CallbackStackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackStackState")
            .field("name", &self.name)
            .field("entered", &self.entered)
            .field("exited", &self.exited)
            .field("updated", &self.updated)
            .finish()
    }
}
