//! Builder API for configuring machines.
//!
//! Machines can be created directly with `new()` or `with_config()`; the
//! builders offer the same options fluently.
//!
//! # Example
//!
//! ```
//! use statecraft::config::ReentrancyCheck;
//! use statecraft::core::StackState;
//! use statecraft::machine::StackStateMachine;
//!
//! let machine: StackStateMachine<dyn StackState> = StackStateMachine::builder()
//!     .reentrancy_check(ReentrancyCheck::DebugOnly)
//!     .capacity(8)
//!     .build();
//!
//! assert!(machine.is_empty());
//! ```

pub mod machine;

pub use machine::{StackStateMachineBuilder, StateMachineBuilder};
