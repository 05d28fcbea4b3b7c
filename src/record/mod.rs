//! Structural records of an automaton.
//!
//! A record lists states and transitions with transitions identified by
//! state *name*, not identity. Loading assigns fresh identities and resolves
//! names against the new states. Names are not unique, so resolution follows
//! [`NameResolution`].
//!
//! # Example
//!
//! ```rust
//! use nfa_lab::{Automaton, AutomatonRecord};
//!
//! let json = r#"{
//!     "states": [
//!         { "name": "A", "isInitial": true, "isFinal": false, "position": { "x": 0, "y": 0 } },
//!         { "name": "B", "isInitial": false, "isFinal": true, "position": { "x": 80, "y": 0 } }
//!     ],
//!     "transitions": [ { "from": "A", "to": "B", "label": "x" } ]
//! }"#;
//!
//! let record = AutomatonRecord::from_json(json).unwrap();
//! let automaton = nfa_lab::from_record(&record).unwrap();
//! assert!(automaton.verify(&["x"]).unwrap().accepted);
//! ```

mod document;
mod error;
mod validation;

pub use document::{AutomatonDocument, DOCUMENT_VERSION};
pub use error::DocumentError;
pub use validation::validate_record;

use crate::core::{Automaton, AutomatonError, Position, StateId};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use std::collections::HashMap;
use tracing::warn;

/// Structural contents of an automaton.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AutomatonRecord {
    pub states: Vec<StateRecord>,
    pub transitions: Vec<TransitionRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateRecord {
    pub name: String,
    pub is_initial: bool,
    pub is_final: bool,
    pub position: Position,
}

/// Transition endpoints by state name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub from: String,
    pub to: String,
    pub label: String,
}

impl AutomatonRecord {
    /// Parse the JSON form. Any shape or type mismatch is `MalformedRecord`.
    pub fn from_json(text: &str) -> Result<Self, AutomatonError> {
        serde_json::from_str(text).map_err(|e| AutomatonError::MalformedRecord(e.to_string()))
    }

    /// Encode as pretty-printed JSON.
    ///
    /// Encoding reports the encoder's own error; malformed records are a
    /// loading concern. Non-finite positions are written as `null` and are
    /// rejected when read back.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// How transition endpoint names map onto states when names repeat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameResolution {
    /// The first state declared with a name wins.
    #[default]
    FirstDeclared,
    /// A referenced name shared by several states fails the load.
    Strict,
}

/// Options for loading a record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    pub names: NameResolution,
}

impl LoadOptions {
    /// Options that reject ambiguous endpoint names.
    pub fn strict() -> Self {
        Self {
            names: NameResolution::Strict,
        }
    }
}

/// Capture the structure of `automaton`.
///
/// States and transitions appear in creation order.
pub fn to_record(automaton: &Automaton) -> AutomatonRecord {
    let states = automaton
        .states()
        .map(|s| StateRecord {
            name: s.name().to_string(),
            is_initial: s.is_initial(),
            is_final: s.is_final(),
            position: s.position(),
        })
        .collect();

    let name_of = |id: StateId| automaton.state(id).map(|s| s.name().to_string());
    let transitions = automaton
        .transitions()
        .filter_map(|t| {
            Some(TransitionRecord {
                from: name_of(t.from())?,
                to: name_of(t.to())?,
                label: t.label().to_string(),
            })
        })
        .collect();

    AutomatonRecord {
        states,
        transitions,
    }
}

/// Build an automaton from a record with default options.
pub fn from_record(record: &AutomatonRecord) -> Result<Automaton, AutomatonError> {
    from_record_with(record, &LoadOptions::default())
}

/// Build an automaton from a record.
///
/// The record is validated in full before any state is created.
pub fn from_record_with(
    record: &AutomatonRecord,
    options: &LoadOptions,
) -> Result<Automaton, AutomatonError> {
    build(record, options, &[])
}

/// Build an automaton whose action catalog starts with `actions`.
pub(crate) fn build(
    record: &AutomatonRecord,
    options: &LoadOptions,
    actions: &[String],
) -> Result<Automaton, AutomatonError> {
    if let Validation::Failure(issues) = validate_record(record, options) {
        return Err(validation::first_issue(&issues));
    }

    let mut automaton = Automaton::new();
    for label in actions {
        automaton.remember_action(label);
    }

    let mut by_name: HashMap<&str, StateId> = HashMap::new();
    for state in &record.states {
        let id = automaton.add_state_at(state.name.as_str(), state.position);
        automaton.set_final(id, state.is_final)?;
        if state.is_initial {
            automaton.set_initial(id, true)?;
        }
        by_name.entry(state.name.as_str()).or_insert(id);
    }

    if options.names == NameResolution::FirstDeclared {
        for name in validation::ambiguous_references(record) {
            warn!(name, "duplicate state name; transitions resolve to the first declared state");
        }
    }

    for transition in &record.transitions {
        let resolve = |name: &str| {
            by_name
                .get(name)
                .copied()
                .ok_or_else(|| AutomatonError::unknown_name(name))
        };
        let from = resolve(&transition.from)?;
        let to = resolve(&transition.to)?;
        automaton.add_transition(from, to, transition.label.as_str())?;
    }

    Ok(automaton)
}
