//! Acceptance engine.
//!
//! Given an automaton and a sequence of action labels, decides whether some
//! run from the initial state consumes the whole sequence and ends on a final
//! state. The engine is read-only over the automaton; animation hooks are
//! provided through [`SearchObserver`].

mod observer;
mod options;
mod search;
mod trace;

pub use observer::{NoopObserver, Recorder, SearchObserver, Visit};
pub use options::SearchOptions;
pub use search::{accepts, verify, AcceptanceEngine, SearchOutcome, SearchStats, Verdict};
pub use trace::{Step, Trace};
