//! Machine configuration.
//!
//! Configuration is plain data with serde support so a host can embed it in
//! its own settings. Every field has a default, so partial documents work.

use serde::{Deserialize, Serialize};

/// Default initial capacity of a state stack.
pub const DEFAULT_STACK_CAPACITY: usize = 4;

/// How strictly a machine rejects transitions started from inside another
/// transition's callbacks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReentrancyCheck {
    /// Always reject nested transitions
    #[default]
    Enforced,

    /// Reject nested transitions only when `debug_assertions` are enabled
    DebugOnly,

    /// Never check; nested transitions are a caller contract violation
    Unchecked,
}

impl ReentrancyCheck {
    /// Whether nested transitions are rejected in this build.
    pub fn is_enforced(self) -> bool {
        match self {
            Self::Enforced => true,
            Self::DebugOnly => cfg!(debug_assertions),
            Self::Unchecked => false,
        }
    }
}

/// Configuration shared by both machine flavors.
///
/// # Example
///
/// ```rust
/// use statecraft::config::{MachineConfig, ReentrancyCheck};
///
/// let config = MachineConfig::default().with_reentrancy_check(ReentrancyCheck::DebugOnly);
/// assert_eq!(config.stack_capacity, 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Reentrancy policy for transitions
    pub reentrancy_check: ReentrancyCheck,

    /// Initial capacity of the state stack (stack machines only)
    pub stack_capacity: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            reentrancy_check: ReentrancyCheck::default(),
            stack_capacity: DEFAULT_STACK_CAPACITY,
        }
    }
}

impl MachineConfig {
    /// Set the reentrancy policy.
    pub fn with_reentrancy_check(mut self, check: ReentrancyCheck) -> Self {
        self.reentrancy_check = check;
        self
    }

    /// Set the initial stack capacity.
    pub fn with_stack_capacity(mut self, capacity: usize) -> Self {
        self.stack_capacity = capacity;
        self
    }
}
