//! The configured engine and its dispatch entry point.

use super::error::DispatchError;
use super::internal::dispatch_internal;
use super::machine::{DispatchScope, StateMachine};
use super::outer::dispatch_outer;
use super::row::{InternalRow, TransitionRow};
use crate::builder::BuildError;
use crate::core::{Event, State, StateRegistry};
use tracing::trace;

/// Which table a diagnostic refers to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowTable {
    Outer,
    /// Internal table of the named state.
    Internal { owner: String },
}

/// A row that can never fire because an earlier unconditional row in the
/// same table covers it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShadowedRow {
    pub table: RowTable,
    pub index: usize,
    pub shadowed_by: usize,
}

/// Immutable FSM configuration: state registry, outer table, and internal
/// tables. Built by [`EngineBuilder`](crate::builder::EngineBuilder).
///
/// The engine holds no per-run state. Drive any number of
/// [`StateMachine`] holders through it, one event at a time each.
pub struct Engine<S: State, E: Event, C = ()> {
    registry: StateRegistry<S>,
    initial: S,
    transitions: Vec<TransitionRow<S, E, C>>,
    internal: Vec<(S, Vec<InternalRow<S, E, C>>)>,
    shadowed: Vec<ShadowedRow>,
}

impl<S: State, E: Event, C> Engine<S, E, C> {
    pub(crate) fn new(
        registry: StateRegistry<S>,
        initial: S,
        transitions: Vec<TransitionRow<S, E, C>>,
        internal: Vec<(S, Vec<InternalRow<S, E, C>>)>,
        shadowed: Vec<ShadowedRow>,
    ) -> Self {
        Self {
            registry,
            initial,
            transitions,
            internal,
            shadowed,
        }
    }

    pub fn registry(&self) -> &StateRegistry<S> {
        &self.registry
    }

    /// The state `start` enters.
    pub fn initial_state(&self) -> &S {
        &self.initial
    }

    /// Outer table in declaration order.
    pub fn transitions(&self) -> &[TransitionRow<S, E, C>] {
        &self.transitions
    }

    /// Internal table of `state`, empty if it declares none.
    pub fn internal_rows(&self, state: &S) -> &[InternalRow<S, E, C>] {
        self.internal
            .iter()
            .find(|(owner, _)| owner == state)
            .map(|(_, rows)| rows.as_slice())
            .unwrap_or(&[])
    }

    /// Rows found unreachable while building.
    pub fn shadowed_rows(&self) -> &[ShadowedRow] {
        &self.shadowed
    }

    /// Create a holder around `context` and enter the configured initial state.
    pub fn start(&self, context: C) -> StateMachine<S, C> {
        let mut machine = StateMachine::new(context);
        machine.initialize(self.initial.clone());
        machine
    }

    /// Enter `state` on a holder that has no active state yet.
    ///
    /// Calls `enter` on `state` with no matching `exit`. Refuses states
    /// outside the registry and holders that were already initialized.
    pub fn set_initial_state(
        &self,
        machine: &mut StateMachine<S, C>,
        state: S,
    ) -> Result<(), BuildError> {
        if let Some(current) = machine.current_state() {
            return Err(BuildError::AlreadyInitialized {
                state: current.name().to_string(),
            });
        }
        self.registry.require(&state, "initial")?;
        machine.initialize(state);
        Ok(())
    }

    /// Dispatch one event.
    ///
    /// The active state's internal table is tried first; if a row there
    /// fires, the outer table is not consulted. Returns `Ok(false)` when no
    /// row accepted the event, in which case nothing was run.
    ///
    /// Calling this again for the same holder from inside a guard or action
    /// returns [`DispatchError::Reentrant`].
    pub fn on_event(
        &self,
        machine: &mut StateMachine<S, C>,
        event: &E,
    ) -> Result<bool, DispatchError> {
        let mut scope = DispatchScope::enter(machine).ok_or_else(|| DispatchError::Reentrant {
            event: format!("{:?}", event.kind()),
        })?;
        self.dispatch(&mut *scope.machine, event)
    }

    fn dispatch(&self, machine: &mut StateMachine<S, C>, event: &E) -> Result<bool, DispatchError> {
        let current = machine
            .current_state()
            .cloned()
            .ok_or(DispatchError::Uninitialized)?;

        if dispatch_internal(self.internal_rows(&current), &current, machine, event)? {
            return Ok(true);
        }
        if dispatch_outer(&self.transitions, &current, machine, event)? {
            return Ok(true);
        }

        trace!(state = current.name(), event = ?event.kind(), "event ignored");
        Ok(false)
    }
}

impl<S: State, E: Event, C> std::fmt::Debug for Engine<S, E, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("states", &self.registry.states())
            .field("initial", &self.initial)
            .field("transitions", &self.transitions.len())
            .field("internal_tables", &self.internal.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{EngineBuilder, InternalBuilder, TransitionBuilder};
    use crate::dispatch::ActionError;
    use crate::{event_enum, state_enum};

    state_enum! {
        enum Player {
            Stopped,
            Playing,
            Paused,
        }
    }

    event_enum! {
        enum Command {
            Play,
            Pause,
            Stop,
            Seek,
        }
    }

    type Log = Vec<String>;

    type Machine = StateMachine<Player, Log>;

    fn note(tag: &'static str) -> impl Fn(&mut Machine, &Command) -> Result<(), ActionError> {
        move |m, _e| {
            m.context_mut().push(tag.to_string());
            Ok(())
        }
    }

    fn engine() -> Engine<Player, Command, Log> {
        EngineBuilder::new()
            .states(Player::variants())
            .initial(Player::Stopped)
            .transition(
                TransitionBuilder::new()
                    .on(Command::Play)
                    .from(Player::Stopped)
                    .to(Player::Playing)
                    .action(note("start")),
            )
            .unwrap()
            .transition(
                TransitionBuilder::new()
                    .on(Command::Pause)
                    .from(Player::Playing)
                    .to(Player::Paused)
                    .action(note("pause")),
            )
            .unwrap()
            .transition(
                TransitionBuilder::new()
                    .on(Command::Seek)
                    .from(Player::Playing)
                    .to(Player::Stopped)
                    .action(note("outer seek")),
            )
            .unwrap()
            .transition(
                TransitionBuilder::new()
                    .on_any()
                    .from(Player::Paused)
                    .to(Player::Playing)
                    .does_nothing(),
            )
            .unwrap()
            .internal(
                Player::Playing,
                InternalBuilder::new().on(Command::Seek).action(note("inner seek")),
            )
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn start_enters_initial_state() {
        let engine = engine();
        let machine = engine.start(Vec::new());

        assert!(machine.is_in(&Player::Stopped));
        assert_eq!(engine.initial_state(), &Player::Stopped);
    }

    #[test]
    fn outer_row_transitions() {
        let engine = engine();
        let mut machine = engine.start(Vec::new());

        assert!(engine.on_event(&mut machine, &Command::Play).unwrap());
        assert!(machine.is_in(&Player::Playing));
        assert_eq!(machine.context(), &vec!["start".to_string()]);
    }

    #[test]
    fn internal_row_takes_precedence() {
        let engine = engine();
        let mut machine = engine.start(Vec::new());
        engine.on_event(&mut machine, &Command::Play).unwrap();

        assert!(engine.on_event(&mut machine, &Command::Seek).unwrap());
        assert!(machine.is_in(&Player::Playing));
        assert_eq!(
            machine.context(),
            &vec!["start".to_string(), "inner seek".to_string()]
        );
    }

    #[test]
    fn unmatched_event_is_ignored() {
        let engine = engine();
        let mut machine = engine.start(Vec::new());

        assert!(!engine.on_event(&mut machine, &Command::Stop).unwrap());
        assert!(machine.is_in(&Player::Stopped));
        assert!(machine.context().is_empty());
    }

    #[test]
    fn wildcard_row_catches_everything() {
        let engine = engine();
        let mut machine = engine.start(Vec::new());
        engine.on_event(&mut machine, &Command::Play).unwrap();
        engine.on_event(&mut machine, &Command::Pause).unwrap();

        assert!(engine.on_event(&mut machine, &Command::Stop).unwrap());
        assert!(machine.is_in(&Player::Playing));
    }

    #[test]
    fn uninitialized_machine_is_rejected() {
        let engine = engine();
        let mut machine = StateMachine::new(Vec::new());

        let result = engine.on_event(&mut machine, &Command::Play);
        assert!(matches!(result, Err(DispatchError::Uninitialized)));

        // the dispatch flag was released
        engine.set_initial_state(&mut machine, Player::Paused).unwrap();
        assert!(engine.on_event(&mut machine, &Command::Play).unwrap());
    }

    #[test]
    fn set_initial_state_validates() {
        let engine = engine();
        let mut machine = StateMachine::new(Vec::new());

        engine.set_initial_state(&mut machine, Player::Playing).unwrap();
        assert!(machine.is_in(&Player::Playing));

        let again = engine.set_initial_state(&mut machine, Player::Stopped);
        assert_eq!(
            again,
            Err(BuildError::AlreadyInitialized {
                state: "Playing".to_string()
            })
        );
    }

    #[test]
    fn set_initial_state_rejects_unregistered_state() {
        let engine: Engine<Player, Command, Log> = EngineBuilder::new()
            .states([Player::Stopped, Player::Playing])
            .initial(Player::Stopped)
            .transition(
                TransitionBuilder::new()
                    .on(Command::Play)
                    .from(Player::Stopped)
                    .to(Player::Playing)
                    .does_nothing(),
            )
            .unwrap()
            .build()
            .unwrap();
        let mut machine = StateMachine::new(Vec::new());

        let result = engine.set_initial_state(&mut machine, Player::Paused);
        assert!(matches!(
            result,
            Err(BuildError::UnknownState { role: "initial", .. })
        ));
        assert!(!machine.is_initialized());
    }

    #[test]
    fn nested_dispatch_is_refused() {
        let engine = engine();
        let mut machine = engine.start(Vec::new());

        assert!(machine.begin_dispatch());
        let result = engine.on_event(&mut machine, &Command::Play);

        assert!(matches!(result, Err(DispatchError::Reentrant { ref event }) if event == "Play"));
        assert!(machine.is_in(&Player::Stopped));
    }

    #[test]
    fn panicking_guard_leaves_holder_usable() {
        let engine: Engine<Player, Command, Log> = EngineBuilder::new()
            .states(Player::variants())
            .initial(Player::Stopped)
            .transition(
                TransitionBuilder::new()
                    .on(Command::Stop)
                    .from(Player::Stopped)
                    .to(Player::Paused)
                    .when(|_m: &Machine, _e: &Command| panic!("guard blew up"))
                    .does_nothing(),
            )
            .unwrap()
            .transition(
                TransitionBuilder::new()
                    .on(Command::Play)
                    .from(Player::Stopped)
                    .to(Player::Playing)
                    .action(note("start")),
            )
            .unwrap()
            .build()
            .unwrap();
        let mut machine = engine.start(Vec::new());

        let unwound = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            engine.on_event(&mut machine, &Command::Stop)
        }));
        assert!(unwound.is_err());
        assert!(machine.is_in(&Player::Stopped));

        assert!(engine.on_event(&mut machine, &Command::Play).unwrap());
        assert!(machine.is_in(&Player::Playing));
    }

    #[test]
    fn internal_table_applies_without_outgoing_rows() {
        let engine: Engine<Player, Command, Log> = EngineBuilder::new()
            .states([Player::Stopped, Player::Playing])
            .initial(Player::Stopped)
            .transition(
                TransitionBuilder::new()
                    .on(Command::Play)
                    .from(Player::Stopped)
                    .to(Player::Playing)
                    .does_nothing(),
            )
            .unwrap()
            .internal(
                Player::Playing,
                InternalBuilder::new().on(Command::Seek).action(note("inner seek")),
            )
            .unwrap()
            .build()
            .unwrap();
        let mut machine = engine.start(Vec::new());
        engine.on_event(&mut machine, &Command::Play).unwrap();

        // no outer row leaves Playing, the internal table is still consulted
        assert!(engine.on_event(&mut machine, &Command::Seek).unwrap());
        assert!(!engine.on_event(&mut machine, &Command::Pause).unwrap());

        assert!(machine.is_in(&Player::Playing));
        assert_eq!(machine.context(), &vec!["inner seek".to_string()]);
        assert_eq!(machine.history().transitions().len(), 1);
    }

    #[test]
    fn internal_rows_default_to_empty() {
        let engine = engine();

        assert_eq!(engine.internal_rows(&Player::Playing).len(), 1);
        assert!(engine.internal_rows(&Player::Stopped).is_empty());
        assert_eq!(engine.transitions().len(), 4);
        assert!(engine.shadowed_rows().is_empty());
    }
}
