//! States of an automaton and the registry that owns them.
//!
//! A state's identity is issued by the registry and never changes. The
//! display name is free text: it can be renamed at any time and two states
//! may share it.

use super::error::AutomatonError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stable identity of a state.
///
/// Identities are issued in increasing order, so ordering by id is
/// ordering by creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StateId(u64);

impl StateId {
    /// Wrap a raw identity value.
    ///
    /// Only useful for tests and diagnostics; live ids come from the
    /// automaton.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw identity value.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// Opaque view-layer coordinates. The engine never reads them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Create a position from view coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A node of the automaton.
///
/// # Example
///
/// ```rust
/// use nfa_lab::Automaton;
///
/// let mut automaton = Automaton::new();
/// let q0 = automaton.add_state("q0");
/// automaton.set_initial(q0, true).unwrap();
///
/// let state = automaton.state(q0).unwrap();
/// assert_eq!(state.name(), "q0");
/// assert!(state.is_initial());
/// assert!(!state.is_final());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct State {
    id: StateId,
    name: String,
    is_initial: bool,
    is_final: bool,
    position: Position,
}

impl State {
    /// Stable identity of this state.
    pub fn id(&self) -> StateId {
        self.id
    }

    /// Display name. Not unique.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if runs start here.
    pub fn is_initial(&self) -> bool {
        self.is_initial
    }

    /// Check if a run may end here.
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    /// View coordinates carried for the editor.
    pub fn position(&self) -> Position {
        self.position
    }
}

/// Owns the set of states and the single-initial pointer.
#[derive(Clone, Debug, Default)]
pub(crate) struct StateRegistry {
    states: BTreeMap<StateId, State>,
    initial: Option<StateId>,
    next_id: u64,
}

impl StateRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, name: impl Into<String>, position: Position) -> StateId {
        let id = StateId(self.next_id);
        self.next_id += 1;
        self.states.insert(
            id,
            State {
                id,
                name: name.into(),
                is_initial: false,
                is_final: false,
                position,
            },
        );
        id
    }

    pub(crate) fn get(&self, id: StateId) -> Option<&State> {
        self.states.get(&id)
    }

    pub(crate) fn contains(&self, id: StateId) -> bool {
        self.states.contains_key(&id)
    }

    /// States in creation order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &State> {
        self.states.values()
    }

    pub(crate) fn len(&self) -> usize {
        self.states.len()
    }

    pub(crate) fn initial(&self) -> Option<&State> {
        self.initial.and_then(|id| self.states.get(&id))
    }

    fn get_mut(&mut self, id: StateId) -> Result<&mut State, AutomatonError> {
        self.states
            .get_mut(&id)
            .ok_or_else(|| AutomatonError::unknown_id(id))
    }

    pub(crate) fn rename(&mut self, id: StateId, name: impl Into<String>) -> Result<(), AutomatonError> {
        self.get_mut(id)?.name = name.into();
        Ok(())
    }

    pub(crate) fn set_position(&mut self, id: StateId, position: Position) -> Result<(), AutomatonError> {
        self.get_mut(id)?.position = position;
        Ok(())
    }

    pub(crate) fn set_final(&mut self, id: StateId, value: bool) -> Result<(), AutomatonError> {
        self.get_mut(id)?.is_final = value;
        Ok(())
    }

    /// Move or clear the initial designation.
    ///
    /// The target is checked before anything changes, so a failed call
    /// leaves the previous initial state in place.
    pub(crate) fn set_initial(&mut self, id: StateId, value: bool) -> Result<(), AutomatonError> {
        if !self.contains(id) {
            return Err(AutomatonError::unknown_id(id));
        }

        if value {
            if let Some(previous) = self.initial.take() {
                if let Some(state) = self.states.get_mut(&previous) {
                    state.is_initial = false;
                }
            }
            self.get_mut(id)?.is_initial = true;
            self.initial = Some(id);
        } else if self.initial == Some(id) {
            self.get_mut(id)?.is_initial = false;
            self.initial = None;
        }
        Ok(())
    }

    pub(crate) fn remove(&mut self, id: StateId) -> Result<State, AutomatonError> {
        let removed = self
            .states
            .remove(&id)
            .ok_or_else(|| AutomatonError::unknown_id(id))?;
        if self.initial == Some(id) {
            self.initial = None;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn initial_count(registry: &StateRegistry) -> usize {
        registry.iter().filter(|s| s.is_initial()).count()
    }

    #[test]
    fn new_state_is_neither_initial_nor_final() {
        let mut registry = StateRegistry::new();
        let id = registry.add("q0", Position::default());

        let state = registry.get(id).unwrap();
        assert_eq!(state.name(), "q0");
        assert!(!state.is_initial());
        assert!(!state.is_final());
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut registry = StateRegistry::new();
        let a = registry.add("same", Position::default());
        let b = registry.add("same", Position::default());

        assert_ne!(a, b);
        assert!(a < b);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut registry = StateRegistry::new();
        let a = registry.add("a", Position::default());
        registry.remove(a).unwrap();
        let b = registry.add("b", Position::default());

        assert_ne!(a, b);
    }

    #[test]
    fn rename_keeps_identity() {
        let mut registry = StateRegistry::new();
        let id = registry.add("old", Position::default());
        registry.rename(id, "new").unwrap();

        assert_eq!(registry.get(id).unwrap().name(), "new");
    }

    #[test]
    fn set_initial_moves_designation() {
        let mut registry = StateRegistry::new();
        let x = registry.add("x", Position::default());
        let y = registry.add("y", Position::default());

        registry.set_initial(x, true).unwrap();
        registry.set_initial(x, true).unwrap();
        registry.set_initial(y, true).unwrap();

        assert_eq!(initial_count(&registry), 1);
        assert_eq!(registry.initial().unwrap().id(), y);
        assert!(!registry.get(x).unwrap().is_initial());
    }

    #[test]
    fn clearing_non_initial_state_is_noop() {
        let mut registry = StateRegistry::new();
        let x = registry.add("x", Position::default());
        let y = registry.add("y", Position::default());
        registry.set_initial(x, true).unwrap();

        registry.set_initial(y, false).unwrap();

        assert_eq!(registry.initial().unwrap().id(), x);
    }

    #[test]
    fn set_initial_on_unknown_state_keeps_previous() {
        let mut registry = StateRegistry::new();
        let x = registry.add("x", Position::default());
        registry.set_initial(x, true).unwrap();

        let result = registry.set_initial(StateId::from_raw(99), true);

        assert!(matches!(result, Err(AutomatonError::UnknownState(_))));
        assert_eq!(registry.initial().unwrap().id(), x);
    }

    #[test]
    fn state_may_be_initial_and_final() {
        let mut registry = StateRegistry::new();
        let x = registry.add("x", Position::default());
        registry.set_initial(x, true).unwrap();
        registry.set_final(x, true).unwrap();

        let state = registry.get(x).unwrap();
        assert!(state.is_initial() && state.is_final());
    }

    #[test]
    fn removing_initial_clears_pointer() {
        let mut registry = StateRegistry::new();
        let x = registry.add("x", Position::default());
        registry.set_initial(x, true).unwrap();

        registry.remove(x).unwrap();

        assert!(registry.initial().is_none());
        assert!(registry.remove(x).is_err());
    }
}
