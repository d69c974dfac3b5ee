//! Builder for constructing engines.

use crate::builder::error::BuildError;
use crate::builder::transition::{InternalBuilder, TransitionBuilder};
use crate::core::{Event, State, StateRegistry};
use crate::dispatch::{Engine, InternalRow, RowTable, ShadowedRow, TransitionRow};
use tracing::warn;

/// Builder for constructing engines with a fluent API.
///
/// All validation happens in [`build`](Self::build): registry membership of
/// every state a row mentions, the initial state, and guard well-formedness.
pub struct EngineBuilder<S: State, E: Event, C = ()> {
    states: Vec<S>,
    initial: Option<S>,
    transitions: Vec<TransitionRow<S, E, C>>,
    internal: Vec<(S, Vec<InternalRow<S, E, C>>)>,
}

impl<S: State, E: Event, C> EngineBuilder<S, E, C> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            initial: None,
            transitions: Vec::new(),
            internal: Vec::new(),
        }
    }

    /// Declare one state.
    pub fn state(mut self, state: S) -> Self {
        self.states.push(state);
        self
    }

    /// Declare several states.
    pub fn states<I>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        self.states.extend(states);
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<S, E, C>) -> Result<Self, BuildError> {
        let row = builder.build()?;
        self.transitions.push(row);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, row: TransitionRow<S, E, C>) -> Self {
        self.transitions.push(row);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, rows: Vec<TransitionRow<S, E, C>>) -> Self {
        self.transitions.extend(rows);
        self
    }

    /// Append a row to `owner`'s internal table.
    pub fn internal(
        mut self,
        owner: S,
        builder: InternalBuilder<S, E, C>,
    ) -> Result<Self, BuildError> {
        let row = builder.build()?;
        self.push_internal(owner, row);
        Ok(self)
    }

    /// Append a pre-built row to `owner`'s internal table.
    pub fn add_internal(mut self, owner: S, row: InternalRow<S, E, C>) -> Self {
        self.push_internal(owner, row);
        self
    }

    fn push_internal(&mut self, owner: S, row: InternalRow<S, E, C>) {
        match self.internal.iter_mut().find(|(existing, _)| *existing == owner) {
            Some((_, rows)) => rows.push(row),
            None => self.internal.push((owner, vec![row])),
        }
    }

    /// Build the engine.
    /// Returns an error if the configuration is malformed.
    pub fn build(self) -> Result<Engine<S, E, C>, BuildError> {
        let registry = StateRegistry::new(self.states)?;

        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        registry.require(&initial, "initial")?;

        if self.transitions.is_empty() && self.internal.iter().all(|(_, rows)| rows.is_empty()) {
            return Err(BuildError::NoRows);
        }

        for row in &self.transitions {
            registry.require(&row.from, "source")?;
            registry.require(&row.to, "target")?;
            row.guard.validate()?;
        }
        for (owner, rows) in &self.internal {
            registry.require(owner, "internal table owner")?;
            for row in rows {
                row.guard.validate()?;
            }
        }

        let shadowed = find_shadowed(&self.transitions, &self.internal);
        for row in &shadowed {
            warn!(
                table = ?row.table,
                index = row.index,
                shadowed_by = row.shadowed_by,
                "row is unreachable"
            );
        }

        Ok(Engine::new(
            registry,
            initial,
            self.transitions,
            self.internal,
            shadowed,
        ))
    }
}

impl<S: State, E: Event, C> Default for EngineBuilder<S, E, C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Rows preceded, in the same table and scope, by an unconditional row whose
/// event pattern covers theirs.
fn find_shadowed<S: State, E: Event, C>(
    transitions: &[TransitionRow<S, E, C>],
    internal: &[(S, Vec<InternalRow<S, E, C>>)],
) -> Vec<ShadowedRow> {
    let mut shadowed = Vec::new();

    for (index, later) in transitions.iter().enumerate() {
        let earlier = transitions[..index].iter().position(|earlier| {
            earlier.from == later.from
                && earlier.guard.is_always()
                && earlier.event.covers(&later.event)
        });
        if let Some(shadowed_by) = earlier {
            shadowed.push(ShadowedRow {
                table: RowTable::Outer,
                index,
                shadowed_by,
            });
        }
    }

    for (owner, rows) in internal {
        for (index, later) in rows.iter().enumerate() {
            let earlier = rows[..index].iter().position(|earlier| {
                earlier.guard.is_always() && earlier.event.covers(&later.event)
            });
            if let Some(shadowed_by) = earlier {
                shadowed.push(ShadowedRow {
                    table: RowTable::Internal {
                        owner: owner.name().to_string(),
                    },
                    index,
                    shadowed_by,
                });
            }
        }
    }

    shadowed
}
