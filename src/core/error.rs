//! Error kinds reported by edits, loads and verification requests.

use super::state::StateId;
use std::fmt;
use thiserror::Error;

/// How a missing state was referenced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateRef {
    /// By internal identity (edit operations).
    Id(StateId),
    /// By display name (record load).
    Name(String),
}

impl fmt::Display for StateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => write!(f, "'{name}'"),
        }
    }
}

/// Errors that can occur when editing, loading or querying an automaton.
///
/// All of them are detected before a search or mutation proceeds. A search
/// that completes without an accepting path is not an error.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AutomatonError {
    #[error("No initial state designated. Call set_initial(id, true) before verifying")]
    NoInitialState,

    #[error("Query sequence is empty. Add at least one action")]
    EmptySequence,

    #[error("Unknown state {0}")]
    UnknownState(StateRef),

    #[error("State name '{name}' is ambiguous ({matches} states share it)")]
    AmbiguousName { name: String, matches: usize },

    #[error("Malformed record: {0}")]
    MalformedRecord(String),
}

impl AutomatonError {
    pub(crate) fn unknown_id(id: StateId) -> Self {
        Self::UnknownState(StateRef::Id(id))
    }

    pub(crate) fn unknown_name(name: impl Into<String>) -> Self {
        Self::UnknownState(StateRef::Name(name.into()))
    }
}
