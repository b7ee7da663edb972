//! The transition engines.
//!
//! # Key Concepts
//!
//! - **StateMachine**: one active state, replaced with `set_state`
//! - **StackStateMachine**: a stack of states, changed with `push` and `pop`
//! - **Reentrancy**: a transition can never be started from inside the
//!   enter, exit or observer callbacks of another transition on the same
//!   machine
//!
//! Both machines are driven by calling `update` once per tick and both
//! implement their own state trait, so machines nest inside machines.

mod error;
mod single;
mod stack;

pub use error::MachineError;
pub use single::{StateChange, StateMachine};
pub use stack::StackStateMachine;
