//! Automaton data model.
//!
//! This module contains the editable graph:
//! - States with stable identities and initial/final flags
//! - Labeled transitions, including parallel edges and self-loops
//! - The `Automaton` that composes both and keeps them consistent
//! - The editable query sequence handed to the acceptance engine

mod automaton;
mod error;
mod sequence;
mod state;
mod transition;

pub use automaton::Automaton;
pub use error::{AutomatonError, StateRef};
pub use sequence::QuerySequence;
pub use state::{Position, State, StateId};
pub use transition::{Transition, TransitionId};
