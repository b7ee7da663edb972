//! Statecraft: composable state machines driven by an external tick
//!
//! Statecraft offers two machine flavors built on the same lifecycle:
//! a single-slot [`StateMachine`] with one replaceable active state, and a
//! [`StackStateMachine`] whose top-of-stack state is active. Every machine is
//! also a state, so machines nest into hierarchical state machines.
//!
//! # Core Concepts
//!
//! - **State**: behavior with enter, exit and update callbacks via the
//!   [`State`] and [`StackState`] traits
//! - **Transitions**: `set_state`, `push` and `pop`, always invoked by
//!   application code, never by time
//! - **Reentrancy guard**: starting a transition from inside another
//!   transition's callbacks on the same machine is a bug and panics
//! - **Errors**: reading or popping a stack that is too shallow returns a
//!   [`MachineError`]
//! - **Timing**: each machine tracks how long its active state has been
//!   active
//!
//! Machines are single-threaded and hold states as `Rc` handles. The host
//! calls `update` once per tick on the root machine.
//!
//! # Example
//!
//! ```rust
//! use statecraft::{StackAction, StackState, StackStateMachine};
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! #[derive(Default)]
//! struct Gameplay {
//!     resumed: Cell<u32>,
//! }
//!
//! impl StackState for Gameplay {
//!     fn on_enter(&self, action: StackAction) {
//!         if action == StackAction::Pop {
//!             self.resumed.set(self.resumed.get() + 1);
//!         }
//!     }
//! }
//!
//! struct Pause;
//! impl StackState for Pause {}
//!
//! let gameplay = Rc::new(Gameplay::default());
//! let machine: StackStateMachine<dyn StackState> = StackStateMachine::new();
//!
//! machine.push(gameplay.clone());
//! machine.push(Rc::new(Pause));
//! machine.update(Duration::from_millis(16));
//! machine.pop().unwrap();
//!
//! assert_eq!(gameplay.resumed.get(), 1);
//! assert_eq!(machine.len(), 1);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod machine;
pub mod observer;

// Re-export commonly used types
pub use crate::config::{MachineConfig, ReentrancyCheck};
pub use crate::core::{StackAction, StackState, State};
pub use crate::machine::{MachineError, StackStateMachine, StateChange, StateMachine};
pub use crate::observer::{Observers, Subscription};
