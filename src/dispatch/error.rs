//! Errors raised while dispatching events.

use super::action::ActionError;
use thiserror::Error;

/// Runtime dispatch failures.
///
/// An unmatched event is not an error; `on_event` reports it as `Ok(false)`.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Machine has no active state. Call set_initial_state before dispatching")]
    Uninitialized,

    #[error("Re-entrant dispatch of {event} while the machine is handling another event")]
    Reentrant { event: String },

    #[error("Action failed in state '{state}' on {event}: {source}")]
    ActionFailed {
        state: String,
        event: String,
        #[source]
        source: ActionError,
    },
}
