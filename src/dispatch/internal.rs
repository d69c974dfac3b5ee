//! Internal (per-state) table dispatch.

use super::error::DispatchError;
use super::machine::StateMachine;
use super::row::InternalRow;
use crate::core::{Event, State};
use tracing::debug;

/// Apply the first internal row of `current` that accepts `event`.
///
/// Never changes the active state. Returns `Ok(true)` when a row fired;
/// the caller must then skip the outer table.
pub(crate) fn dispatch_internal<S, E, C>(
    rows: &[InternalRow<S, E, C>],
    current: &S,
    machine: &mut StateMachine<S, C>,
    event: &E,
) -> Result<bool, DispatchError>
where
    S: State,
    E: Event,
{
    for (index, row) in rows.iter().enumerate() {
        if !row.accepts(machine, event) {
            continue;
        }

        debug!(
            state = current.name(),
            event = ?event.kind(),
            row = index,
            "handled internally"
        );
        row.action
            .execute(machine, event)
            .map_err(|source| DispatchError::ActionFailed {
                state: current.name().to_string(),
                event: format!("{:?}", event.kind()),
                source,
            })?;
        return Ok(true);
    }

    Ok(false)
}
