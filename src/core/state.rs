//! Lifecycle traits implemented by states.
//!
//! A state is an opaque unit of behavior that a machine enters, updates and
//! exits. Machines never construct or destroy states; they only track which
//! state is current. States are shared as `Rc` handles, so all callbacks take
//! `&self` and states keep their own mutable data behind `Cell`/`RefCell`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Trait for states driven by a [`StateMachine`](crate::machine::StateMachine).
///
/// Every method has an empty default, so a state only implements the
/// callbacks it cares about.
///
/// # Example
///
/// ```rust
/// use statecraft::core::State;
/// use std::cell::Cell;
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct Blink {
///     visible: Cell<bool>,
/// }
///
/// impl State for Blink {
///     fn name(&self) -> &str {
///         "Blink"
///     }
///
///     fn on_enter(&self) {
///         self.visible.set(true);
///     }
///
///     fn on_update(&self, _delta_time: Duration) {
///         self.visible.set(!self.visible.get());
///     }
/// }
///
/// let blink = Blink::default();
/// blink.on_enter();
/// blink.on_update(Duration::from_millis(16));
/// assert!(!blink.visible.get());
/// ```
pub trait State {
    /// Get the state's name for logging.
    ///
    /// Defaults to the Rust type name of the implementor.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Called when the state becomes the active state.
    fn on_enter(&self) {}

    /// Called when the state stops being the active state.
    fn on_exit(&self) {}

    /// Called once per tick while the state is active.
    fn on_update(&self, delta_time: Duration) {
        let _ = delta_time;
    }
}

/// Why a stack state is being entered or exited.
///
/// On exit, `Push` means the state was covered by a new top and is suspended,
/// `Pop` means it was removed. On enter, `Push` means the state was freshly
/// pushed, `Pop` means it was uncovered and is resuming.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackAction {
    /// Transition caused by a push
    Push,
    /// Transition caused by a pop
    Pop,
}

impl fmt::Display for StackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Push => f.write_str("push"),
            Self::Pop => f.write_str("pop"),
        }
    }
}

/// Trait for states driven by a
/// [`StackStateMachine`](crate::machine::StackStateMachine).
///
/// Enter and exit carry the [`StackAction`] that caused them, which lets a
/// state tell "freshly created" apart from "resumed after a child was popped".
///
/// # Example
///
/// ```rust
/// use statecraft::core::{StackAction, StackState};
/// use std::cell::Cell;
///
/// #[derive(Default)]
/// struct Inventory {
///     refreshes: Cell<u32>,
/// }
///
/// impl StackState for Inventory {
///     fn on_enter(&self, action: StackAction) {
///         if action == StackAction::Pop {
///             self.refreshes.set(self.refreshes.get() + 1);
///         }
///     }
/// }
///
/// let inventory = Inventory::default();
/// inventory.on_enter(StackAction::Push);
/// inventory.on_enter(StackAction::Pop);
/// assert_eq!(inventory.refreshes.get(), 1);
/// ```
pub trait StackState {
    /// Get the state's name for logging.
    ///
    /// Defaults to the Rust type name of the implementor.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Called when the state becomes the top of the stack.
    fn on_enter(&self, action: StackAction) {
        let _ = action;
    }

    /// Called when the state stops being the top of the stack.
    fn on_exit(&self, action: StackAction) {
        let _ = action;
    }

    /// Called once per tick while the state is the top of the stack.
    fn on_update(&self, delta_time: Duration) {
        let _ = delta_time;
    }
}
