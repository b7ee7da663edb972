//! Errors raised by machine operations.

use thiserror::Error;

/// Precondition failures reported by stack operations.
///
/// Every check runs before any mutation, so a failed call leaves the machine
/// untouched. Nested transitions are not reported here: they panic, see
/// [`TransitionGuard`](crate::core::TransitionGuard).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MachineError {
    /// Pop was called on an empty stack
    #[error("Cannot pop from an empty state stack")]
    EmptyStack,

    /// The top or the state beneath it was read from a stack that does not
    /// hold enough states
    #[error("State stack of depth {depth} is too shallow, at least {required} required")]
    StackTooShallow { required: usize, depth: usize },

    /// A stack slot that does not exist was read
    #[error("State index {index} out of range for stack of depth {depth}")]
    OutOfRange { index: usize, depth: usize },

    /// A batch pop asked for more states than the stack holds
    #[error("Cannot pop {requested} states from stack of depth {depth}")]
    InsufficientDepth { requested: usize, depth: usize },
}

impl MachineError {
    /// Depth of the stack when the check failed.
    pub fn depth(&self) -> usize {
        match self {
            Self::EmptyStack => 0,
            Self::StackTooShallow { depth, .. }
            | Self::OutOfRange { depth, .. }
            | Self::InsufficientDepth { depth, .. } => *depth,
        }
    }
}
