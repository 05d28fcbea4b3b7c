//! Nondeterministic acceptance search.
//!
//! A sequence is accepted when at least one run consumes every action and
//! stops on a final state. The search is depth-first over an explicit frame
//! stack. Each frame is a `(state, consumed)` pair; a pair already on the
//! stack is never re-entered, and with the failure memo enabled a pair that
//! was fully explored without success is never explored twice.

use super::observer::{NoopObserver, SearchObserver, Visit};
use super::options::SearchOptions;
use super::trace::{Step, Trace};
use crate::core::{Automaton, AutomatonError, StateId, Transition};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Counters describing how much work a search did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Frames entered, the initial one included.
    pub frames: usize,
    /// Branches skipped because their pair was already on the stack.
    pub pruned_in_flight: usize,
    /// Branches skipped because their pair was known to fail.
    pub pruned_known_failures: usize,
}

/// Result of a completed search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub accepted: bool,
    /// The accepting run, or the deepest path explored when rejected.
    /// `None` when trace recording is off.
    pub trace: Option<Trace>,
    pub stats: SearchStats,
}

/// A search either completes or is abandoned by its observer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Completed(Verdict),
    Cancelled {
        /// Path on the stack when the search stopped.
        trace: Option<Trace>,
        stats: SearchStats,
    },
}

impl SearchOutcome {
    /// The verdict, unless the search was cancelled.
    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            Self::Completed(verdict) => Some(verdict),
            Self::Cancelled { .. } => None,
        }
    }

    /// Consume the outcome, returning the verdict unless cancelled.
    pub fn into_verdict(self) -> Option<Verdict> {
        match self {
            Self::Completed(verdict) => Some(verdict),
            Self::Cancelled { .. } => None,
        }
    }

    /// Check if the observer stopped the search.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Decides acceptance of action sequences.
///
/// The engine only reads the automaton.
#[derive(Clone, Debug, Default)]
pub struct AcceptanceEngine {
    options: SearchOptions,
}

impl AcceptanceEngine {
    /// Create an engine with the given options.
    pub fn new(options: SearchOptions) -> Self {
        Self { options }
    }

    /// Options this engine searches with.
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Run the search to completion.
    pub fn accepts<L: AsRef<str>>(
        &self,
        automaton: &Automaton,
        sequence: &[L],
    ) -> Result<Verdict, AutomatonError> {
        let SearchOutcome::Completed(verdict) = self.run(automaton, sequence, &mut NoopObserver)? else {
            unreachable!("NoopObserver never cancels a search");
        };
        Ok(verdict)
    }

    /// Run the search, reporting every visit to `observer`.
    ///
    /// Preconditions are checked before the first visit: the automaton
    /// needs an initial state and the sequence at least one action.
    pub fn run<L, O>(
        &self,
        automaton: &Automaton,
        sequence: &[L],
        observer: &mut O,
    ) -> Result<SearchOutcome, AutomatonError>
    where
        L: AsRef<str>,
        O: SearchObserver + ?Sized,
    {
        let initial = automaton
            .initial_state()
            .ok_or(AutomatonError::NoInitialState)?;
        if sequence.is_empty() {
            return Err(AutomatonError::EmptySequence);
        }

        let labels: Vec<&str> = sequence.iter().map(AsRef::as_ref).collect();
        let search = Search::new(automaton, labels, &self.options);
        let outcome = search.execute(initial.id(), observer);

        match &outcome {
            SearchOutcome::Completed(verdict) => debug!(
                accepted = verdict.accepted,
                frames = verdict.stats.frames,
                length = sequence.len(),
                "search completed"
            ),
            SearchOutcome::Cancelled { stats, .. } => {
                debug!(frames = stats.frames, "search cancelled")
            }
        }
        Ok(outcome)
    }
}

/// Check `sequence` against `automaton`, recording a trace.
pub fn accepts<L: AsRef<str>>(automaton: &Automaton, sequence: &[L]) -> Result<Verdict, AutomatonError> {
    AcceptanceEngine::default().accepts(automaton, sequence)
}

/// Check `sequence` against `automaton` without recording a trace.
pub fn verify<L: AsRef<str>>(automaton: &Automaton, sequence: &[L]) -> Result<Verdict, AutomatonError> {
    AcceptanceEngine::new(SearchOptions::default().with_trace(false)).accepts(automaton, sequence)
}

impl Automaton {
    /// Shorthand for [`verify`].
    pub fn verify<L: AsRef<str>>(&self, sequence: &[L]) -> Result<Verdict, AutomatonError> {
        verify(self, sequence)
    }
}

struct Frame<'a> {
    state: StateId,
    consumed: usize,
    via: Option<&'a Transition>,
    is_final: bool,
    candidates: Vec<&'a Transition>,
    next: usize,
    // A child was skipped by the in-flight guard, so failure here is not final.
    guarded: bool,
}

impl Frame<'_> {
    fn visit(&self) -> Visit {
        Visit {
            state: self.state,
            consumed: self.consumed,
            via: self.via.map(Transition::id),
            is_final: self.is_final,
        }
    }
}

enum Entered {
    Pushed,
    Accepted,
    Stopped,
}

struct Search<'a> {
    automaton: &'a Automaton,
    labels: Vec<&'a str>,
    options: &'a SearchOptions,
    stack: Vec<Frame<'a>>,
    in_flight: HashSet<(StateId, usize)>,
    known_failures: HashSet<(StateId, usize)>,
    // Transitions of the deepest path so far; `shared` leading entries
    // still match the stack.
    deepest: Vec<&'a Transition>,
    shared: usize,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    fn new(automaton: &'a Automaton, labels: Vec<&'a str>, options: &'a SearchOptions) -> Self {
        Self {
            automaton,
            labels,
            options,
            stack: Vec::new(),
            in_flight: HashSet::new(),
            known_failures: HashSet::new(),
            deepest: Vec::new(),
            shared: 0,
            stats: SearchStats::default(),
        }
    }

    fn execute<O>(mut self, initial: StateId, observer: &mut O) -> SearchOutcome
    where
        O: SearchObserver + ?Sized,
    {
        match self.enter(initial, 0, None, observer) {
            Entered::Accepted => return self.accept(),
            Entered::Stopped => return self.cancel(),
            Entered::Pushed => {}
        }

        loop {
            let Some(top) = self.stack.last_mut() else {
                break;
            };
            let candidate = top.candidates.get(top.next).copied();
            top.next += 1;
            let consumed = top.consumed + 1;

            let Some(transition) = candidate else {
                self.backtrack(observer);
                continue;
            };

            let key = (transition.to(), consumed);
            if self.in_flight.contains(&key) {
                self.stats.pruned_in_flight += 1;
                if let Some(top) = self.stack.last_mut() {
                    top.guarded = true;
                }
                continue;
            }
            if self.options.memoize_failures && self.known_failures.contains(&key) {
                self.stats.pruned_known_failures += 1;
                continue;
            }

            match self.enter(transition.to(), consumed, Some(transition), observer) {
                Entered::Accepted => return self.accept(),
                Entered::Stopped => return self.cancel(),
                Entered::Pushed => {}
            }
        }

        let trace = self
            .options
            .record_trace
            .then(|| trace_along(initial, self.deepest.iter().copied()));
        SearchOutcome::Completed(Verdict {
            accepted: false,
            trace,
            stats: self.stats,
        })
    }

    fn enter<O>(
        &mut self,
        state: StateId,
        consumed: usize,
        via: Option<&'a Transition>,
        observer: &mut O,
    ) -> Entered
    where
        O: SearchObserver + ?Sized,
    {
        let is_final = self.automaton.state(state).is_some_and(|s| s.is_final());
        let candidates: Vec<&'a Transition> = match self.labels.get(consumed).copied() {
            Some(label) => self.automaton.transitions_from(state, label).collect(),
            None => Vec::new(),
        };

        self.stats.frames += 1;
        trace!(%state, consumed, branches = candidates.len(), "visiting");

        self.in_flight.insert((state, consumed));
        self.stack.push(Frame {
            state,
            consumed,
            via,
            is_final,
            candidates,
            next: 0,
            guarded: false,
        });
        self.note_depth();

        let visit = Visit {
            state,
            consumed,
            via: via.map(Transition::id),
            is_final,
        };
        if observer.on_visit(visit).is_break() {
            return Entered::Stopped;
        }

        if consumed == self.labels.len() && is_final {
            return Entered::Accepted;
        }
        Entered::Pushed
    }

    fn backtrack<O>(&mut self, observer: &mut O)
    where
        O: SearchObserver + ?Sized,
    {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let key = (frame.state, frame.consumed);
        self.in_flight.remove(&key);
        self.shared = self.shared.min(self.stack.len().saturating_sub(1));
        if !frame.guarded {
            self.known_failures.insert(key);
        } else if let Some(parent) = self.stack.last_mut() {
            parent.guarded = true;
        }
        observer.on_backtrack(frame.visit());
    }

    /// Keep the first path to reach a new depth. Only the part of the stack
    /// past the prefix it still shares with the previous deepest path is
    /// copied, so each frame is copied at most once while it is on the stack.
    fn note_depth(&mut self) {
        if !self.options.record_trace {
            return;
        }
        let depth = self.stack.len() - 1;
        if depth <= self.deepest.len() {
            return;
        }
        self.deepest.truncate(self.shared);
        let fresh = self.stack[self.shared + 1..].iter().filter_map(|frame| frame.via);
        self.deepest.extend(fresh);
        self.shared = depth;
    }

    fn current_trace(&self) -> Trace {
        let start = self.stack.first().map_or_else(|| StateId::from_raw(0), |f| f.state);
        trace_along(start, self.stack.iter().filter_map(|frame| frame.via))
    }

    fn accept(self) -> SearchOutcome {
        let trace = self.options.record_trace.then(|| self.current_trace());
        SearchOutcome::Completed(Verdict {
            accepted: true,
            trace,
            stats: self.stats,
        })
    }

    fn cancel(self) -> SearchOutcome {
        let trace = self.options.record_trace.then(|| self.current_trace());
        SearchOutcome::Cancelled {
            trace,
            stats: self.stats,
        }
    }
}

fn trace_along<'t>(start: StateId, transitions: impl Iterator<Item = &'t Transition>) -> Trace {
    let steps = transitions
        .map(|t| Step {
            from: t.from(),
            transition: t.id(),
            label: t.label().to_string(),
            to: t.to(),
        })
        .collect();
    Trace::from_steps(start, steps)
}
