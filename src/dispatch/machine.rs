//! Active-state holder.

use crate::core::{State, StateHistory, StateTransition};
use chrono::Utc;
use tracing::trace;

/// Owns the active state, the user context, and the transition history.
///
/// A fresh holder has no active state; the engine's `set_initial_state`
/// (or `Engine::start`) gives it one. After that it always holds exactly
/// one state.
///
/// Only the engine changes the active state. Actions get `&mut` access to
/// reach the context, not to move the machine:
///
/// ```compile_fail
/// use fsm_table::dispatch::StateMachine;
/// use fsm_table::state_enum;
///
/// state_enum! {
///     enum Gate {
///         Open,
///         Shut,
///     }
/// }
///
/// let mut machine: StateMachine<Gate> = StateMachine::new(());
/// machine.transition_to(Gate::Shut);
/// ```
pub struct StateMachine<S: State, C = ()> {
    current: Option<S>,
    context: C,
    history: StateHistory<S>,
    dispatching: bool,
}

impl<S: State, C> StateMachine<S, C> {
    /// Create a holder with no active state.
    pub fn new(context: C) -> Self {
        Self {
            current: None,
            context,
            history: StateHistory::new(),
            dispatching: false,
        }
    }

    /// Keep at most `limit` transitions in the history.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history = StateHistory::with_limit(limit);
        self
    }

    /// Get current state (pure)
    pub fn current_state(&self) -> Option<&S> {
        self.current.as_ref()
    }

    /// Whether the active state is `state`.
    pub fn is_in(&self, state: &S) -> bool {
        self.current.as_ref() == Some(state)
    }

    pub fn is_initialized(&self) -> bool {
        self.current.is_some()
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn into_context(self) -> C {
        self.context
    }

    /// Get state history (pure)
    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    /// Exit the current state, make `next` active, enter it.
    ///
    /// Runs unconditionally, including when `next` equals the current
    /// state. `exit` returns before `next` is assigned and entered.
    pub(crate) fn transition_to(&mut self, next: S) {
        if let Some(previous) = &self.current {
            trace!(state = previous.name(), "exit");
            previous.exit();
        }
        let entered = self.current.insert(next);
        trace!(state = entered.name(), "enter");
        entered.enter();
    }

    /// Enter `initial` without exiting anything.
    pub(crate) fn initialize(&mut self, initial: S) {
        debug_assert!(self.current.is_none());
        self.transition_to(initial);
    }

    /// Transition and append the move to the history.
    pub(crate) fn apply(&mut self, next: S, event: String) {
        let from = self.current.clone();
        self.transition_to(next.clone());
        if let Some(from) = from {
            self.history.record(StateTransition {
                from,
                to: next,
                event,
                timestamp: Utc::now(),
            });
        }
    }

    /// Mark the start of a dispatch. Returns false if one is already running.
    pub(crate) fn begin_dispatch(&mut self) -> bool {
        !std::mem::replace(&mut self.dispatching, true)
    }

    pub(crate) fn end_dispatch(&mut self) {
        self.dispatching = false;
    }
}

/// Holds the dispatching flag for the length of one `on_event` call and
/// clears it on drop, including while a panic unwinds.
pub(crate) struct DispatchScope<'a, S: State, C> {
    pub(crate) machine: &'a mut StateMachine<S, C>,
}

impl<'a, S: State, C> DispatchScope<'a, S, C> {
    /// `None` if a dispatch is already running on `machine`.
    pub(crate) fn enter(machine: &'a mut StateMachine<S, C>) -> Option<Self> {
        if machine.begin_dispatch() {
            Some(Self { machine })
        } else {
            None
        }
    }
}

impl<S: State, C> Drop for DispatchScope<'_, S, C> {
    fn drop(&mut self) {
        self.machine.end_dispatch();
    }
}

impl<S: State, C: std::fmt::Debug> std::fmt::Debug for StateMachine<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current)
            .field("context", &self.context)
            .field("transitions", &self.history.transitions().len())
            .finish()
    }
}
