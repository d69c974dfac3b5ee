//! Builder API for engine construction.
//!
//! This module provides fluent builders for rows and engines, and macros
//! for declaring state and event enums with minimal boilerplate. Every
//! configuration error is reported here, before a machine can run.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::BuildError;
pub use machine::EngineBuilder;
pub use transition::{InternalBuilder, TransitionBuilder};
