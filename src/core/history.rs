//! Bounded record of the transitions a machine has taken.
//!
//! Only outer-table transitions are recorded. Internal handling never
//! changes state and therefore never appears here.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Default number of transitions kept before the oldest are dropped.
pub const DEFAULT_HISTORY_LIMIT: usize = 256;

/// Record of a single state transition.
///
/// # Example
///
/// ```rust
/// use fsm_table::core::StateTransition;
/// use fsm_table::state_enum;
/// use chrono::Utc;
///
/// state_enum! {
///     enum Task {
///         Pending,
///         Running,
///     }
/// }
///
/// let transition = StateTransition {
///     from: Task::Pending,
///     to: Task::Running,
///     event: "Start".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.event, "Start");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// Debug rendering of the triggering event kind
    pub event: String,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered, bounded history of state transitions.
///
/// Once `limit` entries are held, recording a new transition drops the
/// oldest one. A limit of zero disables recording.
///
/// # Example
///
/// ```rust
/// use fsm_table::core::{StateHistory, StateTransition};
/// use fsm_table::state_enum;
/// use chrono::Utc;
///
/// state_enum! {
///     enum Work {
///         Start,
///         Middle,
///         End,
///     }
/// }
///
/// let mut history = StateHistory::new();
/// history.record(StateTransition {
///     from: Work::Start,
///     to: Work::Middle,
///     event: "Next".to_string(),
///     timestamp: Utc::now(),
/// });
/// history.record(StateTransition {
///     from: Work::Middle,
///     to: Work::End,
///     event: "Next".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec![&Work::Start, &Work::Middle, &Work::End]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: VecDeque<StateTransition<S>>,
    limit: usize,
    dropped: u64,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create an empty history holding up to [`DEFAULT_HISTORY_LIMIT`] entries.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Create an empty history holding up to `limit` entries.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: VecDeque::new(),
            limit,
            dropped: 0,
        }
    }

    /// Append a transition, evicting the oldest entry when full.
    pub fn record(&mut self, transition: StateTransition<S>) {
        if self.limit == 0 {
            self.dropped += 1;
            return;
        }
        while self.transitions.len() >= self.limit {
            self.transitions.pop_front();
            self.dropped += 1;
        }
        self.transitions.push_back(transition);
    }

    /// Get the path of states traversed by the retained transitions.
    ///
    /// Returns the `from` state of the oldest retained transition followed
    /// by the `to` state of each transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the oldest and newest retained transitions.
    ///
    /// Returns `None` if nothing has been recorded.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Retained transitions, oldest first.
    pub fn transitions(&self) -> &VecDeque<StateTransition<S>> {
        &self.transitions
    }

    /// Most recent transition.
    pub fn latest(&self) -> Option<&StateTransition<S>> {
        self.transitions.back()
    }

    /// Maximum number of retained transitions.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of transitions evicted or not retained because of the limit.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Initial,
        Processing,
        Complete,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Initial => "Initial",
                Self::Processing => "Processing",
                Self::Complete => "Complete",
            }
        }
    }

    fn step(from: TestState, to: TestState) -> StateTransition<TestState> {
        StateTransition {
            from,
            to,
            event: "Tick".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<TestState> = StateHistory::new();
        assert_eq!(history.transitions().len(), 0);
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.latest().is_none());
        assert_eq!(history.limit(), DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn record_adds_transition() {
        let mut history = StateHistory::new();
        history.record(step(TestState::Initial, TestState::Processing));

        assert_eq!(history.transitions().len(), 1);
        assert_eq!(history.latest().unwrap().to, TestState::Processing);
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let mut history = StateHistory::new();
        history.record(step(TestState::Initial, TestState::Processing));
        history.record(step(TestState::Processing, TestState::Complete));

        let path = history.get_path();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], &TestState::Initial);
        assert_eq!(path[1], &TestState::Processing);
        assert_eq!(path[2], &TestState::Complete);
    }

    #[test]
    fn limit_evicts_oldest_first() {
        let mut history = StateHistory::with_limit(2);
        history.record(step(TestState::Initial, TestState::Processing));
        history.record(step(TestState::Processing, TestState::Complete));
        history.record(step(TestState::Complete, TestState::Initial));

        assert_eq!(history.transitions().len(), 2);
        assert_eq!(history.dropped(), 1);
        assert_eq!(
            history.get_path(),
            vec![
                &TestState::Processing,
                &TestState::Complete,
                &TestState::Initial
            ]
        );
    }

    #[test]
    fn long_runs_keep_the_newest_window() {
        let mut history = StateHistory::with_limit(3);
        let cycle = [TestState::Initial, TestState::Processing, TestState::Complete];
        for i in 0..1000 {
            history.record(step(cycle[i % 3].clone(), cycle[(i + 1) % 3].clone()));
        }

        assert_eq!(history.transitions().len(), 3);
        assert_eq!(history.dropped(), 997);
        assert_eq!(history.latest().unwrap().from, cycle[999 % 3]);
    }

    #[test]
    fn zero_limit_disables_recording() {
        let mut history = StateHistory::with_limit(0);
        history.record(step(TestState::Initial, TestState::Processing));

        assert!(history.transitions().is_empty());
        assert_eq!(history.dropped(), 1);
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let mut history = StateHistory::new();
        history.record(step(TestState::Initial, TestState::Processing));

        std::thread::sleep(std::time::Duration::from_millis(10));

        history.record(step(TestState::Processing, TestState::Complete));

        let duration = history.duration();
        assert!(duration.is_some());
        assert!(duration.unwrap() >= std::time::Duration::from_millis(10));
    }

    #[test]
    fn single_transition_has_duration_zero() {
        let mut history = StateHistory::new();
        history.record(step(TestState::Initial, TestState::Processing));

        assert_eq!(history.duration(), Some(std::time::Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = StateHistory::with_limit(8);
        history.record(step(TestState::Initial, TestState::Processing));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<TestState> = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.transitions().len(), 1);
        assert_eq!(deserialized.limit(), 8);
        assert_eq!(deserialized.transitions()[0].event, "Tick");
    }
}
