//! Core state machine types.
//!
//! This module contains the vocabulary the dispatch engine works with:
//! - State definitions via the `State` trait, and the registry of declared states
//! - Events and the patterns rows match them with
//! - Guard predicates and their AND/OR/NOT combinators
//! - Bounded transition history

mod event;
mod guard;
mod history;
mod registry;
mod state;

pub use event::{Event, EventPattern};
pub use guard::{Guard, Predicate};
pub use history::{StateHistory, StateTransition, DEFAULT_HISTORY_LIMIT};
pub use registry::StateRegistry;
pub use state::State;
