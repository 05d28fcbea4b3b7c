//! Verification as a Stillwater effect.

use crate::core::{Automaton, AutomatonError};
use crate::engine::{AcceptanceEngine, SearchOptions, Verdict};
use std::sync::Arc;
use stillwater::effect::BoxedEffect;
use stillwater::prelude::*;

/// Environments that can hand out the automaton to query.
pub trait HasAutomaton {
    fn automaton(&self) -> &Automaton;
}

impl HasAutomaton for Automaton {
    fn automaton(&self) -> &Automaton {
        self
    }
}

impl HasAutomaton for Arc<Automaton> {
    fn automaton(&self) -> &Automaton {
        self
    }
}

/// Build an effect that checks `sequence` against the environment's
/// automaton when run.
///
/// Preconditions are checked when the effect runs, against whatever
/// automaton the environment holds at that point.
pub fn verify_effect<Env>(
    sequence: Vec<String>,
    options: SearchOptions,
) -> BoxedEffect<Verdict, AutomatonError, Env>
where
    Env: HasAutomaton + Clone + Send + Sync + 'static,
{
    let engine = AcceptanceEngine::new(options);
    from_fn(move |env: &Env| engine.accepts(env.automaton(), &sequence)).boxed()
}
