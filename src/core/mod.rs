//! Core building blocks shared by both machine flavors.
//!
//! This module contains:
//! - The `State` and `StackState` lifecycle traits
//! - The reentrancy guard wrapped around every transition
//! - The duration-in-state timer

mod guard;
mod state;
mod timer;

pub use guard::{GuardToken, TransitionGuard};

#[cfg(test)]
pub(crate) use guard::panic_message;
pub use state::{StackAction, StackState, State};
pub use timer::StateTimer;
