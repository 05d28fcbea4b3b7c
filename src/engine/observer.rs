//! Step observation for animating a search.
//!
//! Pacing and rendering belong to the caller. The engine only reports each
//! visit and asks whether to keep going.

use crate::core::{StateId, TransitionId};
use std::ops::ControlFlow;

/// One visited search frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Visit {
    pub state: StateId,
    /// Number of actions consumed to reach this frame.
    pub consumed: usize,
    /// Transition taken to get here; `None` for the initial state.
    pub via: Option<TransitionId>,
    pub is_final: bool,
}

/// Receives search progress.
///
/// Returning `ControlFlow::Break(())` from `on_visit` abandons the search.
/// The automaton is never modified either way.
pub trait SearchObserver {
    fn on_visit(&mut self, visit: Visit) -> ControlFlow<()>;

    /// Called when a frame is left without finding an accepting run.
    fn on_backtrack(&mut self, _visit: Visit) {}
}

/// Observer that never interrupts.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn on_visit(&mut self, _visit: Visit) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

impl<F> SearchObserver for F
where
    F: FnMut(Visit) -> ControlFlow<()>,
{
    fn on_visit(&mut self, visit: Visit) -> ControlFlow<()> {
        self(visit)
    }
}

/// Collects every visit; useful for replaying a search step by step.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    visits: Vec<Visit>,
    backtracks: usize,
}

impl Recorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Visits in the order they happened.
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// Number of frames abandoned.
    pub fn backtracks(&self) -> usize {
        self.backtracks
    }
}

impl SearchObserver for Recorder {
    fn on_visit(&mut self, visit: Visit) -> ControlFlow<()> {
        self.visits.push(visit);
        ControlFlow::Continue(())
    }

    fn on_backtrack(&mut self, _visit: Visit) {
        self.backtracks += 1;
    }
}
