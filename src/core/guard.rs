//! Guard predicates for controlling transitions.
//!
//! Guards are read-only boolean functions over the machine and the incoming
//! event. They compose with AND/OR/NOT, and composites short-circuit left to
//! right, so a guard may be evaluated zero or one time per dispatch attempt.

use super::state::State;
use crate::builder::BuildError;
use crate::dispatch::StateMachine;
use std::fmt;
use std::sync::Arc;

/// Type alias for leaf guard predicates.
pub type Predicate<S, E, C> = Arc<dyn Fn(&StateMachine<S, C>, &E) -> bool + Send + Sync>;

/// Predicate that decides whether a row may fire.
///
/// # Example
///
/// ```rust
/// use fsm_table::core::Guard;
/// use fsm_table::dispatch::StateMachine;
/// use fsm_table::state_enum;
///
/// state_enum! {
///     enum Light {
///         Red,
///         Green,
///     }
/// }
///
/// let machine: StateMachine<Light, u32> = StateMachine::new(3);
///
/// let has_cars = Guard::new(|m: &StateMachine<Light, u32>, _e: &()| *m.context() > 0);
/// let rush_hour = Guard::new(|m: &StateMachine<Light, u32>, _e: &()| *m.context() > 10);
///
/// let either = Guard::or([has_cars.clone(), rush_hour.clone()]);
/// let both = Guard::and([has_cars, rush_hour]);
///
/// assert!(either.check(&machine, &()));
/// assert!(!both.check(&machine, &()));
/// ```
pub enum Guard<S: State, E, C = ()> {
    /// Always passes; never evaluated.
    Always,
    /// A user predicate.
    Check(Predicate<S, E, C>),
    /// Passes when every member passes. Stops at the first failure.
    And(Vec<Guard<S, E, C>>),
    /// Passes when any member passes. Stops at the first success.
    Or(Vec<Guard<S, E, C>>),
    /// Negation of the inner guard.
    Not(Box<Guard<S, E, C>>),
}

impl<S: State, E, C> Guard<S, E, C> {
    /// Create a guard from a predicate function.
    ///
    /// The predicate gets a shared reference to the machine and must not
    /// rely on being called any particular number of times.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&StateMachine<S, C>, &E) -> bool + Send + Sync + 'static,
    {
        Guard::Check(Arc::new(predicate))
    }

    /// Conjunction of `guards`, evaluated left to right.
    ///
    /// An empty list is rejected when the owning engine is built.
    pub fn and<I>(guards: I) -> Self
    where
        I: IntoIterator<Item = Guard<S, E, C>>,
    {
        Guard::And(guards.into_iter().collect())
    }

    /// Disjunction of `guards`, evaluated left to right.
    ///
    /// An empty list is rejected when the owning engine is built.
    pub fn or<I>(guards: I) -> Self
    where
        I: IntoIterator<Item = Guard<S, E, C>>,
    {
        Guard::Or(guards.into_iter().collect())
    }

    /// Negation of `guard`.
    pub fn not(guard: Guard<S, E, C>) -> Self {
        Guard::Not(Box::new(guard))
    }

    /// Whether this is the unconditional marker.
    pub fn is_always(&self) -> bool {
        matches!(self, Guard::Always)
    }

    /// Evaluate the guard against the machine and event.
    pub fn check(&self, machine: &StateMachine<S, C>, event: &E) -> bool {
        match self {
            Guard::Always => true,
            Guard::Check(predicate) => predicate(machine, event),
            Guard::And(guards) => guards.iter().all(|g| g.check(machine, event)),
            Guard::Or(guards) => guards.iter().any(|g| g.check(machine, event)),
            Guard::Not(inner) => !inner.check(machine, event),
        }
    }

    /// Reject empty composites anywhere in the tree.
    pub fn validate(&self) -> Result<(), BuildError> {
        match self {
            Guard::Always | Guard::Check(_) => Ok(()),
            Guard::And(guards) if guards.is_empty() => {
                Err(BuildError::EmptyComposite { combinator: "AND" })
            }
            Guard::Or(guards) if guards.is_empty() => {
                Err(BuildError::EmptyComposite { combinator: "OR" })
            }
            Guard::And(guards) | Guard::Or(guards) => guards.iter().try_for_each(Guard::validate),
            Guard::Not(inner) => inner.validate(),
        }
    }
}

impl<S: State, E, C> Default for Guard<S, E, C> {
    fn default() -> Self {
        Guard::Always
    }
}

impl<S: State, E, C> Clone for Guard<S, E, C> {
    fn clone(&self) -> Self {
        match self {
            Guard::Always => Guard::Always,
            Guard::Check(predicate) => Guard::Check(Arc::clone(predicate)),
            Guard::And(guards) => Guard::And(guards.clone()),
            Guard::Or(guards) => Guard::Or(guards.clone()),
            Guard::Not(inner) => Guard::Not(inner.clone()),
        }
    }
}

impl<S: State, E, C> fmt::Debug for Guard<S, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guard::Always => f.write_str("Always"),
            Guard::Check(_) => f.write_str("Check(..)"),
            Guard::And(guards) => f.debug_tuple("And").field(guards).finish(),
            Guard::Or(guards) => f.debug_tuple("Or").field(guards).finish(),
            Guard::Not(inner) => f.debug_tuple("Not").field(inner).finish(),
        }
    }
}
