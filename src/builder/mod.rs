//! Builder API for ergonomic automaton construction.
//!
//! States are referred to by name, the same way a saved record refers to
//! them, and the build goes through the record loader so both paths share
//! validation.

pub mod macros;

use crate::core::{Automaton, AutomatonError, Position};
use crate::record::{self, AutomatonRecord, LoadOptions, StateRecord, TransitionRecord};

/// Fluent builder for automatons.
///
/// # Example
///
/// ```
/// use nfa_lab::builder::AutomatonBuilder;
///
/// let automaton = AutomatonBuilder::new()
///     .state("Locked")
///     .state("Unlocked")
///     .initial("Locked")
///     .final_state("Locked")
///     .transition("Locked", "Unlocked", "coin")
///     .transition("Unlocked", "Locked", "push")
///     .build()
///     .unwrap();
///
/// assert!(automaton.verify(&["coin", "push", "coin", "push"]).unwrap().accepted);
/// ```
#[derive(Clone, Debug, Default)]
pub struct AutomatonBuilder {
    record: AutomatonRecord,
    initial: Option<String>,
    finals: Vec<String>,
    options: LoadOptions,
}

impl AutomatonBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a state at the origin.
    pub fn state(self, name: impl Into<String>) -> Self {
        self.state_at(name, Position::default())
    }

    /// Declare a state at `position`.
    pub fn state_at(mut self, name: impl Into<String>, position: Position) -> Self {
        self.record.states.push(StateRecord {
            name: name.into(),
            is_initial: false,
            is_final: false,
            position,
        });
        self
    }

    /// Set the initial state. The last call wins.
    pub fn initial(mut self, name: impl Into<String>) -> Self {
        self.initial = Some(name.into());
        self
    }

    /// Mark a declared state as final. May be called repeatedly.
    pub fn final_state(mut self, name: impl Into<String>) -> Self {
        self.finals.push(name.into());
        self
    }

    /// Add a transition between declared states, by name.
    pub fn transition(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        self.record.transitions.push(TransitionRecord {
            from: from.into(),
            to: to.into(),
            label: label.into(),
        });
        self
    }

    /// Reject transitions whose endpoint name is shared by several states.
    pub fn strict(mut self) -> Self {
        self.options = LoadOptions::strict();
        self
    }

    /// Build the automaton.
    ///
    /// Flags and transitions naming a state that was never declared fail
    /// with `UnknownState`.
    pub fn build(self) -> Result<Automaton, AutomatonError> {
        let mut record = self.record;

        if let Some(name) = &self.initial {
            first_named(&mut record, name)?.is_initial = true;
        }
        for name in &self.finals {
            first_named(&mut record, name)?.is_final = true;
        }

        record::from_record_with(&record, &self.options)
    }
}

fn first_named<'r>(record: &'r mut AutomatonRecord, name: &str) -> Result<&'r mut StateRecord, AutomatonError> {
    record
        .states
        .iter_mut()
        .find(|s| s.name == name)
        .ok_or_else(|| AutomatonError::unknown_name(name))
}
