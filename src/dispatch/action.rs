//! Row actions and the no-op marker.

use crate::core::State;
use crate::dispatch::StateMachine;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Type alias for action procedures.
pub type ActionFn<S, E, C> =
    Arc<dyn Fn(&mut StateMachine<S, C>, &E) -> Result<(), ActionError> + Send + Sync>;

/// Failure reported by a user action.
///
/// Returning it from an outer-row action cancels that row's state change.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ActionError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an underlying error with context.
    pub fn with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// What a row does when it fires.
///
/// `Nothing` is the explicit "do nothing" marker: dispatch skips it without
/// calling anything. A row with no action at all cannot be built.
pub enum Action<S: State, E, C = ()> {
    Nothing,
    Run(ActionFn<S, E, C>),
}

impl<S: State, E, C> Action<S, E, C> {
    /// Wrap a procedure with read-write access to the machine.
    pub fn new<F>(action: F) -> Self
    where
        F: Fn(&mut StateMachine<S, C>, &E) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        Action::Run(Arc::new(action))
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, Action::Nothing)
    }

    /// Run the action. `Nothing` returns immediately.
    pub fn execute(&self, machine: &mut StateMachine<S, C>, event: &E) -> Result<(), ActionError> {
        match self {
            Action::Nothing => Ok(()),
            Action::Run(action) => action(machine, event),
        }
    }
}

impl<S: State, E, C> Clone for Action<S, E, C> {
    fn clone(&self) -> Self {
        match self {
            Action::Nothing => Action::Nothing,
            Action::Run(action) => Action::Run(Arc::clone(action)),
        }
    }
}

impl<S: State, E, C> fmt::Debug for Action<S, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Nothing => f.write_str("Nothing"),
            Action::Run(_) => f.write_str("Run(..)"),
        }
    }
}
