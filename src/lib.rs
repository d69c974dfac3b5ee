//! fsm_table: a table-driven finite state machine
//!
//! A machine is described once, up front, as a closed set of states and an
//! ordered table of transition rows. Events are then fed in one at a time:
//! the first row that matches the active state, the event kind, and its
//! guard wins, its action runs, and the machine exits the old state and
//! enters the new one. States may also own an internal table whose rows
//! react to events without leaving the state; it is consulted first.
//!
//! # Core Concepts
//!
//! - **State**: values implementing [`State`], with `enter`/`exit` hooks
//! - **Event**: values implementing [`Event`], matched by kind
//! - **Guards**: read-only predicates with AND/OR/NOT composition
//! - **Engine**: the immutable, validated configuration and `on_event`
//! - **StateMachine**: the active state, user context, and history
//!
//! # Example
//!
//! ```rust
//! use fsm_table::builder::{EngineBuilder, TransitionBuilder};
//! use fsm_table::{event_enum, state_enum};
//!
//! state_enum! {
//!     enum Turnstile {
//!         Locked,
//!         Unlocked,
//!     }
//! }
//!
//! event_enum! {
//!     enum Input {
//!         Coin,
//!         Push,
//!     }
//! }
//!
//! let engine = EngineBuilder::<Turnstile, Input, u32>::new()
//!     .states(Turnstile::variants())
//!     .initial(Turnstile::Locked)
//!     .transition(
//!         TransitionBuilder::<_, _, u32>::new()
//!             .on(Input::Coin)
//!             .from(Turnstile::Locked)
//!             .to(Turnstile::Unlocked)
//!             .action(|machine, _event| {
//!                 *machine.context_mut() += 1;
//!                 Ok(())
//!             }),
//!     )?
//!     .transition(
//!         TransitionBuilder::new()
//!             .on(Input::Push)
//!             .from(Turnstile::Unlocked)
//!             .to(Turnstile::Locked)
//!             .does_nothing(),
//!     )?
//!     .build()?;
//!
//! let mut machine = engine.start(0);
//! assert!(engine.on_event(&mut machine, &Input::Coin)?);
//! assert!(!engine.on_event(&mut machine, &Input::Coin)?);
//! assert!(engine.on_event(&mut machine, &Input::Push)?);
//!
//! assert_eq!(machine.current_state(), Some(&Turnstile::Locked));
//! assert_eq!(*machine.context(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod core;
pub mod dispatch;

// Re-export commonly used types
pub use builder::{BuildError, EngineBuilder, InternalBuilder, TransitionBuilder};
pub use core::{Event, EventPattern, Guard, State, StateHistory, StateTransition};
pub use dispatch::{Action, ActionError, DispatchError, Engine, StateMachine};
