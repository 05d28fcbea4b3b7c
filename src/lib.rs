//! nfa-lab: editable finite automata with a nondeterministic acceptance engine
//!
//! An automaton is a labeled directed graph: states (one initial, any number
//! final) joined by transitions tagged with action names. Several transitions
//! may leave a state with the same label, so checking a sequence of actions
//! is a search over every run the sequence allows.
//!
//! # Core Concepts
//!
//! - **Automaton**: Editable states and transitions with stable identities
//! - **Acceptance Engine**: Backtracking search deciding whether some run
//!   consumes the whole sequence and ends on a final state
//! - **Records**: Name-keyed structural snapshots for saving and loading
//! - **Effects**: Verification lifted into a Stillwater effect
//!
//! # Example
//!
//! ```rust
//! use nfa_lab::{accepts, Automaton};
//!
//! let mut automaton = Automaton::new();
//! let a = automaton.add_state("A");
//! let b = automaton.add_state("B");
//! let c = automaton.add_state("C");
//! automaton.set_initial(a, true).unwrap();
//! automaton.set_final(c, true).unwrap();
//!
//! // Two transitions leave A on "x"; only one leads to a final state.
//! automaton.add_transition(a, b, "x").unwrap();
//! automaton.add_transition(a, c, "x").unwrap();
//!
//! let verdict = accepts(&automaton, &["x"]).unwrap();
//! assert!(verdict.accepted);
//! assert_eq!(verdict.trace.unwrap().path(), vec![a, c]);
//! ```

pub mod builder;
pub mod core;
pub mod effects;
pub mod engine;
pub mod record;

// Re-export commonly used types
pub use core::{
    Automaton, AutomatonError, Position, QuerySequence, State, StateId, StateRef, Transition,
    TransitionId,
};
pub use engine::{
    accepts, verify, AcceptanceEngine, SearchObserver, SearchOptions, SearchOutcome, Trace, Verdict,
    Visit,
};
pub use record::{
    from_record, from_record_with, to_record, validate_record, AutomatonDocument, AutomatonRecord,
    DocumentError, LoadOptions, NameResolution,
};
