//! Declarative row descriptors for the outer and internal tables.

use super::action::Action;
use super::machine::StateMachine;
use crate::core::{Event, EventPattern, Guard, State};

/// Outer-table row: when in `from` and a matching event arrives and `guard`
/// holds, run `action`, then move to `to`.
pub struct TransitionRow<S: State, E: Event, C = ()> {
    pub event: EventPattern<E::Kind>,
    pub from: S,
    pub to: S,
    pub action: Action<S, E, C>,
    pub guard: Guard<S, E, C>,
}

impl<S: State, E: Event, C> TransitionRow<S, E, C> {
    /// Whether this row is scoped to `current`.
    pub fn applies_to(&self, current: &S) -> bool {
        self.from == *current
    }

    /// Event pattern first, then the guard. The guard is not evaluated for
    /// events of the wrong kind.
    pub fn accepts(&self, machine: &StateMachine<S, C>, event: &E) -> bool {
        self.event.matches(&event.kind()) && self.guard.check(machine, event)
    }
}

/// Internal-table row, owned by a single state. Never changes state.
pub struct InternalRow<S: State, E: Event, C = ()> {
    pub event: EventPattern<E::Kind>,
    pub action: Action<S, E, C>,
    pub guard: Guard<S, E, C>,
}

impl<S: State, E: Event, C> InternalRow<S, E, C> {
    pub fn accepts(&self, machine: &StateMachine<S, C>, event: &E) -> bool {
        self.event.matches(&event.kind()) && self.guard.check(machine, event)
    }
}

impl<S: State, E: Event, C> Clone for TransitionRow<S, E, C> {
    fn clone(&self) -> Self {
        Self {
            event: self.event,
            from: self.from.clone(),
            to: self.to.clone(),
            action: self.action.clone(),
            guard: self.guard.clone(),
        }
    }
}

impl<S: State, E: Event, C> Clone for InternalRow<S, E, C> {
    fn clone(&self) -> Self {
        Self {
            event: self.event,
            action: self.action.clone(),
            guard: self.guard.clone(),
        }
    }
}

impl<S: State, E: Event, C> std::fmt::Debug for TransitionRow<S, E, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionRow")
            .field("event", &self.event)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("action", &self.action)
            .field("guard", &self.guard)
            .finish()
    }
}

impl<S: State, E: Event, C> std::fmt::Debug for InternalRow<S, E, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InternalRow")
            .field("event", &self.event)
            .field("action", &self.action)
            .field("guard", &self.guard)
            .finish()
    }
}
