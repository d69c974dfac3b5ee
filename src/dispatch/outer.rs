//! Outer transition table dispatch.

use super::error::DispatchError;
use super::machine::StateMachine;
use super::row::TransitionRow;
use crate::core::{Event, State};
use tracing::{debug, trace};

/// Apply the first row scoped to `current` that accepts `event`.
///
/// Rows for other states are skipped without evaluating anything. The
/// action runs before the state change; if it fails, the state change is
/// not performed and the error is returned.
pub(crate) fn dispatch_outer<S, E, C>(
    rows: &[TransitionRow<S, E, C>],
    current: &S,
    machine: &mut StateMachine<S, C>,
    event: &E,
) -> Result<bool, DispatchError>
where
    S: State,
    E: Event,
{
    for (index, row) in rows.iter().enumerate() {
        if !row.applies_to(current) {
            continue;
        }
        if !row.accepts(machine, event) {
            trace!(
                state = current.name(),
                event = ?event.kind(),
                row = index,
                "row rejected"
            );
            continue;
        }

        let kind = format!("{:?}", event.kind());
        row.action
            .execute(machine, event)
            .map_err(|source| DispatchError::ActionFailed {
                state: current.name().to_string(),
                event: kind.clone(),
                source,
            })?;

        debug!(
            from = current.name(),
            to = row.to.name(),
            event = %kind,
            row = index,
            "transition"
        );
        machine.apply(row.to.clone(), kind);
        return Ok(true);
    }

    Ok(false)
}
