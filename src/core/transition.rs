//! Labeled transitions and the registry that owns them.

use super::state::StateId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stable identity of a transition, issued in creation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TransitionId(u64);

impl TransitionId {
    /// Wrap a raw identity value.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw identity value.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// A directed edge between two states, tagged with an action label.
///
/// `from` and `to` may be equal (self-loop). Labels are not unique: any
/// number of transitions may share a label, including parallel ones between
/// the same pair of states.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    id: TransitionId,
    from: StateId,
    to: StateId,
    label: String,
}

impl Transition {
    /// Stable identity of this transition.
    pub fn id(&self) -> TransitionId {
        self.id
    }

    /// Source state.
    pub fn from(&self) -> StateId {
        self.from
    }

    /// Target state.
    pub fn to(&self) -> StateId {
        self.to
    }

    /// Action label consumed by this transition.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Check if source and target are the same state.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// Check if `state` is either endpoint.
    pub fn touches(&self, state: StateId) -> bool {
        self.from == state || self.to == state
    }
}

/// Owns the transitions and the action catalog.
///
/// Endpoint existence is checked by the automaton before `add` is called.
#[derive(Clone, Debug, Default)]
pub(crate) struct TransitionRegistry {
    transitions: BTreeMap<TransitionId, Transition>,
    actions: Vec<String>,
    next_id: u64,
}

impl TransitionRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, from: StateId, to: StateId, label: impl Into<String>) -> TransitionId {
        let label = label.into();
        self.introduce(&label);

        let id = TransitionId(self.next_id);
        self.next_id += 1;
        self.transitions.insert(id, Transition { id, from, to, label });
        id
    }

    pub(crate) fn introduce(&mut self, label: &str) {
        if !self.actions.iter().any(|known| known == label) {
            self.actions.push(label.to_string());
        }
    }

    pub(crate) fn get(&self, id: TransitionId) -> Option<&Transition> {
        self.transitions.get(&id)
    }

    /// Transitions in creation order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.values()
    }

    pub(crate) fn len(&self) -> usize {
        self.transitions.len()
    }

    pub(crate) fn remove(&mut self, id: TransitionId) -> Option<Transition> {
        self.transitions.remove(&id)
    }

    pub(crate) fn relabel(&mut self, id: TransitionId, label: impl Into<String>) -> bool {
        let label = label.into();
        let Some(transition) = self.transitions.get_mut(&id) else {
            return false;
        };
        transition.label = label.clone();
        self.introduce(&label);
        true
    }

    /// Remove every transition entering or leaving `state`.
    pub(crate) fn remove_touching(&mut self, state: StateId) -> Vec<Transition> {
        let doomed: Vec<TransitionId> = self
            .transitions
            .values()
            .filter(|t| t.touches(state))
            .map(Transition::id)
            .collect();

        doomed
            .into_iter()
            .filter_map(|id| self.transitions.remove(&id))
            .collect()
    }

    /// Every transition leaving `state` with `label`, in creation order.
    pub(crate) fn from_with_label<'a>(
        &'a self,
        state: StateId,
        label: &'a str,
    ) -> impl Iterator<Item = &'a Transition> + 'a {
        self.transitions
            .values()
            .filter(move |t| t.from == state && t.label == label)
    }

    /// Transitions from `from` to `to` in creation order.
    pub(crate) fn between(&self, from: StateId, to: StateId) -> impl Iterator<Item = &Transition> {
        self.transitions
            .values()
            .filter(move |t| t.from == from && t.to == to)
    }

    /// Distinct labels in first-introduction order.
    pub(crate) fn actions(&self) -> &[String] {
        &self.actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (StateId, StateId, StateId) {
        (StateId::from_raw(0), StateId::from_raw(1), StateId::from_raw(2))
    }

    #[test]
    fn parallel_transitions_are_kept() {
        let (a, b, _) = ids();
        let mut registry = TransitionRegistry::new();
        let first = registry.add(a, b, "x");
        let second = registry.add(a, b, "x");

        assert_ne!(first, second);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.between(a, b).count(), 2);
    }

    #[test]
    fn from_with_label_preserves_creation_order() {
        let (a, b, c) = ids();
        let mut registry = TransitionRegistry::new();
        let t1 = registry.add(a, c, "x");
        registry.add(a, b, "y");
        let t3 = registry.add(a, b, "x");
        let t4 = registry.add(a, a, "x");

        let matched: Vec<TransitionId> = registry.from_with_label(a, "x").map(Transition::id).collect();
        assert_eq!(matched, vec![t1, t3, t4]);
    }

    #[test]
    fn remove_touching_drops_incoming_and_outgoing() {
        let (a, b, c) = ids();
        let mut registry = TransitionRegistry::new();
        registry.add(a, b, "x");
        registry.add(b, a, "x");
        registry.add(b, b, "loop");
        let kept = registry.add(a, c, "x");

        let removed = registry.remove_touching(b);

        assert_eq!(removed.len(), 3);
        let remaining: Vec<TransitionId> = registry.iter().map(Transition::id).collect();
        assert_eq!(remaining, vec![kept]);
    }

    #[test]
    fn catalog_keeps_first_introduction_order() {
        let (a, b, _) = ids();
        let mut registry = TransitionRegistry::new();
        registry.add(a, b, "coin");
        registry.add(b, a, "push");
        registry.add(a, a, "coin");

        assert_eq!(registry.actions(), ["coin", "push"]);
    }

    #[test]
    fn catalog_outlives_deleted_transitions() {
        let (a, b, _) = ids();
        let mut registry = TransitionRegistry::new();
        let t = registry.add(a, b, "coin");
        registry.remove(t);

        assert_eq!(registry.actions(), ["coin"]);
    }

    #[test]
    fn relabel_introduces_new_label() {
        let (a, b, _) = ids();
        let mut registry = TransitionRegistry::new();
        let t = registry.add(a, b, "x");

        assert!(registry.relabel(t, "y"));
        assert_eq!(registry.get(t).unwrap().label(), "y");
        assert_eq!(registry.actions(), ["x", "y"]);
        assert!(!registry.relabel(TransitionId(42), "z"));
    }

    #[test]
    fn self_loop_is_detected() {
        let (a, b, _) = ids();
        let mut registry = TransitionRegistry::new();
        let looped = registry.add(a, a, "x");
        let straight = registry.add(a, b, "x");

        assert!(registry.get(looped).unwrap().is_self_loop());
        assert!(!registry.get(straight).unwrap().is_self_loop());
    }
}
