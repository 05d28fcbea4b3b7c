//! Paths through the automaton produced by a search.
//!
//! Traces are plain values: they are only used to animate a run and carry no
//! weight in the verdict.

use crate::core::{StateId, TransitionId};
use serde::{Deserialize, Serialize};

/// One consumed action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub from: StateId,
    pub transition: TransitionId,
    pub label: String,
    pub to: StateId,
}

/// Ordered run from a start state.
///
/// # Example
///
/// ```rust
/// use nfa_lab::Automaton;
///
/// let mut automaton = Automaton::new();
/// let a = automaton.add_state("A");
/// let b = automaton.add_state("B");
/// automaton.set_initial(a, true).unwrap();
/// automaton.set_final(b, true).unwrap();
/// automaton.add_transition(a, a, "x").unwrap();
/// automaton.add_transition(a, b, "y").unwrap();
///
/// let verdict = nfa_lab::accepts(&automaton, &["x", "y"]).unwrap();
/// let trace = verdict.trace.unwrap();
///
/// assert_eq!(trace.path(), vec![a, a, b]);
/// assert_eq!(trace.labels(), vec!["x", "y"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    start: StateId,
    steps: Vec<Step>,
}

impl Trace {
    /// Create an empty trace starting at `start`.
    pub fn new(start: StateId) -> Self {
        Self {
            start,
            steps: Vec::new(),
        }
    }

    /// Record a step, returning a new trace. The original is unchanged.
    pub fn record(&self, step: Step) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self {
            start: self.start,
            steps,
        }
    }

    pub(crate) fn from_steps(start: StateId, steps: Vec<Step>) -> Self {
        Self { start, steps }
    }

    /// The state the run started in.
    pub fn start(&self) -> StateId {
        self.start
    }

    /// The state the run ended in.
    pub fn end(&self) -> StateId {
        self.steps.last().map_or(self.start, |step| step.to)
    }

    /// Consumed actions in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Visited states in order, initial and terminal included.
    pub fn path(&self) -> Vec<StateId> {
        std::iter::once(self.start)
            .chain(self.steps.iter().map(|step| step.to))
            .collect()
    }

    /// Labels of the consumed actions, in order.
    pub fn labels(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.label.as_str()).collect()
    }

    /// Number of consumed actions.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if no action was consumed.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(from: u64, to: u64, label: &str) -> Step {
        Step {
            from: StateId::from_raw(from),
            transition: TransitionId::from_raw(from),
            label: label.to_string(),
            to: StateId::from_raw(to),
        }
    }

    #[test]
    fn new_trace_has_only_start() {
        let trace = Trace::new(StateId::from_raw(4));
        assert!(trace.is_empty());
        assert_eq!(trace.path(), vec![StateId::from_raw(4)]);
        assert_eq!(trace.end(), StateId::from_raw(4));
    }

    #[test]
    fn record_is_immutable() {
        let trace = Trace::new(StateId::from_raw(0));
        let extended = trace.record(step(0, 1, "x"));

        assert_eq!(trace.len(), 0);
        assert_eq!(extended.len(), 1);
    }

    #[test]
    fn path_follows_steps() {
        let trace = Trace::new(StateId::from_raw(0))
            .record(step(0, 1, "x"))
            .record(step(1, 1, "y"))
            .record(step(1, 2, "z"));

        let path: Vec<u64> = trace.path().into_iter().map(StateId::raw).collect();
        assert_eq!(path, vec![0, 1, 1, 2]);
        assert_eq!(trace.labels(), vec!["x", "y", "z"]);
        assert_eq!(trace.end(), StateId::from_raw(2));
    }

    #[test]
    fn trace_serializes_correctly() {
        let trace = Trace::new(StateId::from_raw(0)).record(step(0, 1, "x"));
        let json = serde_json::to_string(&trace).unwrap();
        let back: Trace = serde_json::from_str(&json).unwrap();
        assert_eq!(back, trace);
    }
}
