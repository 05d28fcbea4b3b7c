//! Effectful shell around the acceptance engine using Stillwater 0.11.0.
//!
//! The engine itself is a pure function of automaton and sequence. This
//! module lifts it into an `Effect` so applications can compose verification
//! with their own I/O, reading the automaton from the effect environment
//! (typically an `Arc<Automaton>` snapshot taken when the query starts).

mod verify;

pub use verify::{verify_effect, HasAutomaton};
