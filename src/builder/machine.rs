//! Builders for configuring machines.

use crate::config::{MachineConfig, ReentrancyCheck};
use crate::core::{StackAction, StackState, State};
use crate::machine::{StackStateMachine, StateMachine};

/// Builder for [`StateMachine`] with a fluent API.
pub struct StateMachineBuilder<S: ?Sized> {
    config: MachineConfig,
    on_entered: Option<Box<dyn Fn(&StateMachine<S>)>>,
    on_exited: Option<Box<dyn Fn(&StateMachine<S>)>>,
}

impl<S: ?Sized + State> StateMachineBuilder<S> {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: MachineConfig::default(),
            on_entered: None,
            on_exited: None,
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the reentrancy policy.
    pub fn reentrancy_check(mut self, check: ReentrancyCheck) -> Self {
        self.config.reentrancy_check = check;
        self
    }

    /// Run `hook` when a parent machine enters this machine as its state.
    ///
    /// The hook gets the machine itself, typically to select a default
    /// child state.
    pub fn on_entered<F>(mut self, hook: F) -> Self
    where
        F: Fn(&StateMachine<S>) + 'static,
    {
        self.on_entered = Some(Box::new(hook));
        self
    }

    /// Run `hook` when a parent machine exits this machine.
    pub fn on_exited<F>(mut self, hook: F) -> Self
    where
        F: Fn(&StateMachine<S>) + 'static,
    {
        self.on_exited = Some(Box::new(hook));
        self
    }

    /// Build an empty machine.
    pub fn build(self) -> StateMachine<S> {
        let mut machine = StateMachine::with_config(&self.config);
        machine.set_nesting_hooks(self.on_entered, self.on_exited);
        machine
    }
}

impl<S: ?Sized + State> Default for StateMachineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized + State> StateMachine<S> {
    /// Start building a machine.
    pub fn builder() -> StateMachineBuilder<S> {
        StateMachineBuilder::new()
    }
}

/// Builder for [`StackStateMachine`] with a fluent API.
pub struct StackStateMachineBuilder<S: ?Sized> {
    config: MachineConfig,
    on_entered: Option<Box<dyn Fn(&StackStateMachine<S>, StackAction)>>,
    on_exited: Option<Box<dyn Fn(&StackStateMachine<S>, StackAction)>>,
}

impl<S: ?Sized + StackState> StackStateMachineBuilder<S> {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: MachineConfig::default(),
            on_entered: None,
            on_exited: None,
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the reentrancy policy.
    pub fn reentrancy_check(mut self, check: ReentrancyCheck) -> Self {
        self.config.reentrancy_check = check;
        self
    }

    /// Reserve room for `capacity` states up front.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.stack_capacity = capacity;
        self
    }

    /// Run `hook` when a parent stack machine enters this machine, either by
    /// pushing it or by popping the state above it.
    pub fn on_entered<F>(mut self, hook: F) -> Self
    where
        F: Fn(&StackStateMachine<S>, StackAction) + 'static,
    {
        self.on_entered = Some(Box::new(hook));
        self
    }

    /// Run `hook` when a parent stack machine exits this machine.
    pub fn on_exited<F>(mut self, hook: F) -> Self
    where
        F: Fn(&StackStateMachine<S>, StackAction) + 'static,
    {
        self.on_exited = Some(Box::new(hook));
        self
    }

    /// Build an empty machine.
    pub fn build(self) -> StackStateMachine<S> {
        let mut machine = StackStateMachine::with_config(&self.config);
        machine.set_nesting_hooks(self.on_entered, self.on_exited);
        machine
    }
}

impl<S: ?Sized + StackState> Default for StackStateMachineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized + StackState> StackStateMachine<S> {
    /// Start building a machine.
    pub fn builder() -> StackStateMachineBuilder<S> {
        StackStateMachineBuilder::new()
    }
}
