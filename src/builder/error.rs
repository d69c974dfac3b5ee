//! Build errors for engines, rows, and initialization.

use thiserror::Error;

/// Configuration errors. All of them surface before the first event is
/// dispatched.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No states declared. Call .states(..) or .state(..) before .build()")]
    EmptyRegistry,

    #[error("State '{state}' is declared more than once")]
    DuplicateState { state: String },

    #[error("{role} state {state} is not in the state registry")]
    UnknownState { state: String, role: &'static str },

    #[error("No rows defined. Add at least one transition or internal row")]
    NoRows,

    #[error("Row event not specified. Call .on(kind) or .on_any()")]
    MissingEvent,

    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Row action not specified. Call .action(f) or .does_nothing()")]
    MissingAction,

    #[error("{combinator} guard needs at least one member")]
    EmptyComposite { combinator: &'static str },

    #[error("Machine already has an active state '{state}'")]
    AlreadyInitialized { state: String },
}
