//! Event dispatch.
//!
//! This module is the imperative part of the crate: it owns the active
//! state, runs actions, and invokes lifecycle hooks.
//!
//! # Dispatch order
//!
//! 1. The active state's internal table, in declaration order. A firing row
//!    ends dispatch without a state change.
//! 2. The outer table, in declaration order, restricted to rows whose
//!    source is the active state. A firing row runs its action, then exits
//!    the old state and enters the new one.
//! 3. Otherwise the event is ignored and `on_event` returns `Ok(false)`.

mod action;
mod engine;
mod error;
mod internal;
mod machine;
mod outer;
mod row;

pub use action::{Action, ActionError, ActionFn};
pub use engine::{Engine, RowTable, ShadowedRow};
pub use error::DispatchError;
pub use machine::StateMachine;
pub use row::{InternalRow, TransitionRow};
