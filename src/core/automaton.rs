//! The automaton: state and transition registries plus the invariants that
//! span both.

use super::error::AutomatonError;
use super::state::{Position, State, StateId, StateRegistry};
use super::transition::{Transition, TransitionId, TransitionRegistry};
use crate::record::{self, AutomatonRecord, LoadOptions};
use tracing::debug;

/// An editable finite-state automaton.
///
/// Every transition references live states: removing a state removes the
/// transitions touching it. At most one state is initial.
///
/// # Example
///
/// ```rust
/// use nfa_lab::Automaton;
///
/// let mut automaton = Automaton::new();
/// let locked = automaton.add_state("Locked");
/// let unlocked = automaton.add_state("Unlocked");
/// automaton.set_initial(locked, true).unwrap();
/// automaton.set_final(locked, true).unwrap();
/// automaton.add_transition(locked, unlocked, "coin").unwrap();
/// automaton.add_transition(unlocked, locked, "push").unwrap();
///
/// assert!(automaton.verify(&["coin", "push"]).unwrap().accepted);
/// assert!(!automaton.verify(&["coin"]).unwrap().accepted);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Automaton {
    states: StateRegistry,
    transitions: TransitionRegistry,
}

impl Automaton {
    /// Create an empty automaton.
    pub fn new() -> Self {
        Self {
            states: StateRegistry::new(),
            transitions: TransitionRegistry::new(),
        }
    }

    /// Add a state that is neither initial nor final.
    pub fn add_state(&mut self, name: impl Into<String>) -> StateId {
        self.add_state_at(name, Position::default())
    }

    /// Add a state carrying view coordinates.
    pub fn add_state_at(&mut self, name: impl Into<String>, position: Position) -> StateId {
        let id = self.states.add(name, position);
        debug!(state = %id, "state added");
        id
    }

    /// Change a state's display name. Transitions are unaffected.
    pub fn rename_state(&mut self, id: StateId, name: impl Into<String>) -> Result<(), AutomatonError> {
        let name = name.into();
        self.states.rename(id, name.as_str())?;
        debug!(state = %id, name = %name, "state renamed");
        Ok(())
    }

    /// Update a state's view coordinates.
    pub fn move_state(&mut self, id: StateId, position: Position) -> Result<(), AutomatonError> {
        self.states.set_position(id, position)?;
        debug!(state = %id, x = position.x, y = position.y, "state moved");
        Ok(())
    }

    /// Designate (or clear) the initial state.
    ///
    /// Setting a new initial state clears the previous one in the same call.
    pub fn set_initial(&mut self, id: StateId, value: bool) -> Result<(), AutomatonError> {
        self.states.set_initial(id, value)?;
        debug!(state = %id, value, "initial flag set");
        Ok(())
    }

    /// Mark or unmark a state as accepting.
    pub fn set_final(&mut self, id: StateId, value: bool) -> Result<(), AutomatonError> {
        self.states.set_final(id, value)?;
        debug!(state = %id, value, "final flag set");
        Ok(())
    }

    /// Remove a state and every transition entering or leaving it.
    ///
    /// Removing the initial state leaves the automaton without one.
    pub fn remove_state(&mut self, id: StateId) -> Result<State, AutomatonError> {
        let removed = self.states.remove(id)?;
        let dropped = self.transitions.remove_touching(id);
        debug!(state = %id, transitions = dropped.len(), "state removed");
        Ok(removed)
    }

    /// Add a transition. Identical transitions may coexist.
    pub fn add_transition(
        &mut self,
        from: StateId,
        to: StateId,
        label: impl Into<String>,
    ) -> Result<TransitionId, AutomatonError> {
        for endpoint in [from, to] {
            if !self.states.contains(endpoint) {
                return Err(AutomatonError::unknown_id(endpoint));
            }
        }

        let id = self.transitions.add(from, to, label);
        debug!(transition = %id, %from, %to, "transition added");
        Ok(id)
    }

    /// Remove a single transition, returning it if it existed.
    pub fn remove_transition(&mut self, id: TransitionId) -> Option<Transition> {
        let removed = self.transitions.remove(id);
        if removed.is_some() {
            debug!(transition = %id, "transition removed");
        }
        removed
    }

    /// Change a transition's label. Returns `false` for an unknown id.
    pub fn relabel_transition(&mut self, id: TransitionId, label: impl Into<String>) -> bool {
        let label = label.into();
        let relabeled = self.transitions.relabel(id, label.as_str());
        if relabeled {
            debug!(transition = %id, label = %label, "transition relabeled");
        }
        relabeled
    }

    /// Every transition leaving `state` with `label`, in creation order.
    pub fn transitions_from<'a>(
        &'a self,
        state: StateId,
        label: &'a str,
    ) -> impl Iterator<Item = &'a Transition> + 'a {
        self.transitions.from_with_label(state, label)
    }

    /// Transitions between an ordered pair of states, in creation order.
    pub fn parallel_transitions(&self, from: StateId, to: StateId) -> Vec<&Transition> {
        self.transitions.between(from, to).collect()
    }

    /// Index of a transition among the transitions sharing its endpoints.
    ///
    /// The view layer offsets parallel edges by this rank.
    pub fn parallel_rank(&self, id: TransitionId) -> Option<usize> {
        let transition = self.transitions.get(id)?;
        self.transitions
            .between(transition.from(), transition.to())
            .position(|t| t.id() == id)
    }

    /// The initial state, if one is designated.
    pub fn initial_state(&self) -> Option<&State> {
        self.states.initial()
    }

    /// Look up a state by identity.
    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(id)
    }

    /// States in creation order.
    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.states.iter()
    }

    /// States carrying `name`, in creation order.
    pub fn states_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a State> + 'a {
        self.states.iter().filter(move |s| s.name() == name)
    }

    /// Look up a transition by identity.
    pub fn transition(&self, id: TransitionId) -> Option<&Transition> {
        self.transitions.get(id)
    }

    /// Transitions in creation order.
    pub fn transitions(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.iter()
    }

    /// Number of states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Number of transitions.
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Distinct labels ever used by a transition, in first-use order.
    pub fn action_catalog(&self) -> &[String] {
        self.transitions.actions()
    }

    /// Add a label to the catalog without a transition carrying it.
    pub(crate) fn remember_action(&mut self, label: &str) {
        self.transitions.introduce(label);
    }

    /// Structural record of the current automaton.
    pub fn snapshot(&self) -> AutomatonRecord {
        record::to_record(self)
    }

    /// Replace the whole automaton with the contents of `record`.
    ///
    /// Either the record loads completely or `self` is left untouched.
    pub fn restore(&mut self, record: &AutomatonRecord) -> Result<(), AutomatonError> {
        self.restore_with(record, &LoadOptions::default())
    }

    /// Like [`restore`](Self::restore) with explicit name resolution.
    pub fn restore_with(
        &mut self,
        record: &AutomatonRecord,
        options: &LoadOptions,
    ) -> Result<(), AutomatonError> {
        let rebuilt = record::from_record_with(record, options)?;
        *self = rebuilt;
        debug!(
            states = self.state_count(),
            transitions = self.transition_count(),
            "automaton restored"
        );
        Ok(())
    }
}
