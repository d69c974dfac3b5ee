//! The closed set of states a machine may occupy.

use super::state::State;
use crate::builder::BuildError;

/// Declared states, in declaration order.
///
/// Built once by the engine builder. Every initial state, row endpoint, and
/// internal-table owner is checked against it before the engine exists.
#[derive(Clone, Debug)]
pub struct StateRegistry<S: State> {
    states: Vec<S>,
}

impl<S: State> StateRegistry<S> {
    /// Build a registry, rejecting empty and duplicate declarations.
    pub fn new<I>(states: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = S>,
    {
        let mut declared: Vec<S> = Vec::new();
        for state in states {
            if declared.contains(&state) {
                return Err(BuildError::DuplicateState {
                    state: state.name().to_string(),
                });
            }
            declared.push(state);
        }

        if declared.is_empty() {
            return Err(BuildError::EmptyRegistry);
        }

        Ok(Self { states: declared })
    }

    /// Whether `state` was declared.
    pub fn contains(&self, state: &S) -> bool {
        self.states.contains(state)
    }

    /// Fail with `UnknownState` unless `state` was declared.
    pub(crate) fn require(&self, state: &S, role: &'static str) -> Result<(), BuildError> {
        if self.contains(state) {
            Ok(())
        } else {
            Err(BuildError::UnknownState {
                state: format!("{state:?}"),
                role,
            })
        }
    }

    /// Declared states in declaration order.
    pub fn states(&self) -> &[S] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
