//! Builders for outer and internal rows.

use crate::builder::error::BuildError;
use crate::core::{Event, EventPattern, Guard, State};
use crate::dispatch::{Action, ActionError, InternalRow, StateMachine, TransitionRow};

/// Builder for outer-table rows.
///
/// Event, source, target, and action are required. The guard defaults to
/// [`Guard::Always`].
pub struct TransitionBuilder<S: State, E: Event, C = ()> {
    event: Option<EventPattern<E::Kind>>,
    from: Option<S>,
    to: Option<S>,
    guard: Guard<S, E, C>,
    action: Option<Action<S, E, C>>,
}

impl<S: State, E: Event, C> TransitionBuilder<S, E, C> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            event: None,
            from: None,
            to: None,
            guard: Guard::Always,
            action: None,
        }
    }

    /// Match events of `kind` (required, or use `on_any`).
    pub fn on(mut self, kind: E::Kind) -> Self {
        self.event = Some(EventPattern::Kind(kind));
        self
    }

    /// Match every event.
    pub fn on_any(mut self) -> Self {
        self.event = Some(EventPattern::Any);
        self
    }

    /// Set the source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.from = Some(state);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Replace the guard.
    pub fn guard(mut self, guard: Guard<S, E, C>) -> Self {
        self.guard = guard;
        self
    }

    /// Add a guard using a closure.
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&StateMachine<S, C>, &E) -> bool + Send + Sync + 'static,
    {
        self.guard = Guard::new(predicate);
        self
    }

    /// Set the action (required, or use `does_nothing`).
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut StateMachine<S, C>, &E) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        self.action = Some(Action::new(action));
        self
    }

    /// Use a prebuilt action.
    pub fn perform(mut self, action: Action<S, E, C>) -> Self {
        self.action = Some(action);
        self
    }

    /// Declare that the row intentionally runs nothing.
    pub fn does_nothing(self) -> Self {
        self.perform(Action::Nothing)
    }

    /// Build the row.
    pub fn build(self) -> Result<TransitionRow<S, E, C>, BuildError> {
        let event = self.event.ok_or(BuildError::MissingEvent)?;
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;
        let action = self.action.ok_or(BuildError::MissingAction)?;
        self.guard.validate()?;

        Ok(TransitionRow {
            event,
            from,
            to,
            action,
            guard: self.guard,
        })
    }
}

impl<S: State, E: Event, C> Default for TransitionBuilder<S, E, C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for internal-table rows. The owning state is given to
/// [`EngineBuilder::internal`](crate::builder::EngineBuilder::internal).
pub struct InternalBuilder<S: State, E: Event, C = ()> {
    event: Option<EventPattern<E::Kind>>,
    guard: Guard<S, E, C>,
    action: Option<Action<S, E, C>>,
}

impl<S: State, E: Event, C> InternalBuilder<S, E, C> {
    pub fn new() -> Self {
        Self {
            event: None,
            guard: Guard::Always,
            action: None,
        }
    }

    pub fn on(mut self, kind: E::Kind) -> Self {
        self.event = Some(EventPattern::Kind(kind));
        self
    }

    pub fn on_any(mut self) -> Self {
        self.event = Some(EventPattern::Any);
        self
    }

    pub fn guard(mut self, guard: Guard<S, E, C>) -> Self {
        self.guard = guard;
        self
    }

    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&StateMachine<S, C>, &E) -> bool + Send + Sync + 'static,
    {
        self.guard = Guard::new(predicate);
        self
    }

    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut StateMachine<S, C>, &E) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        self.action = Some(Action::new(action));
        self
    }

    pub fn perform(mut self, action: Action<S, E, C>) -> Self {
        self.action = Some(action);
        self
    }

    pub fn does_nothing(self) -> Self {
        self.perform(Action::Nothing)
    }

    pub fn build(self) -> Result<InternalRow<S, E, C>, BuildError> {
        let event = self.event.ok_or(BuildError::MissingEvent)?;
        let action = self.action.ok_or(BuildError::MissingAction)?;
        self.guard.validate()?;

        Ok(InternalRow {
            event,
            action,
            guard: self.guard,
        })
    }
}

impl<S: State, E: Event, C> Default for InternalBuilder<S, E, C> {
    fn default() -> Self {
        Self::new()
    }
}
