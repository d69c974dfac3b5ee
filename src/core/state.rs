//! Core State trait for state machine states.
//!
//! Every value a machine can rest in implements this trait. Besides naming
//! itself for diagnostics, a state exposes the `enter`/`exit` lifecycle
//! hooks that the active-state holder invokes around every transition.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Trait for state machine states.
///
/// # Required Traits
///
/// - `Clone`: rows hold their target state and hand out copies on transition
/// - `PartialEq`: rows are selected by comparing against the active state
/// - `Debug`: states appear in errors and diagnostics
/// - `Serialize` + `Deserialize`: states appear in serializable history
///
/// # Example
///
/// ```rust
/// use fsm_table::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
///
///     fn enter(&self) {
///         println!("door is now {}", self.name());
///     }
/// }
/// ```
pub trait State: Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Called once when the machine moves into this state.
    ///
    /// Default implementation does nothing.
    fn enter(&self) {}

    /// Called once when the machine leaves this state, before the next
    /// state's `enter`.
    ///
    /// Default implementation does nothing.
    fn exit(&self) {}
}
