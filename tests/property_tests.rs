//! Property-based tests for the automaton model and acceptance engine.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated automatons and sequences.

use nfa_lab::{
    accepts, from_record, AcceptanceEngine, Automaton, SearchOptions, StateId,
};
use proptest::prelude::*;
use std::collections::BTreeSet;

const LABELS: [&str; 3] = ["a", "b", "c"];

#[derive(Clone, Debug)]
struct Fixture {
    automaton: Automaton,
    states: Vec<StateId>,
}

prop_compose! {
    fn arbitrary_fixture()(size in 1..6usize)(
        edges in prop::collection::vec((0..size, 0..size, 0..LABELS.len()), 0..14),
        finals in prop::collection::vec(any::<bool>(), size),
        initial in 0..size,
        size in Just(size),
    ) -> Fixture {
        let mut automaton = Automaton::new();
        let states: Vec<StateId> = (0..size).map(|i| automaton.add_state(format!("q{i}"))).collect();
        for (state, is_final) in states.iter().zip(&finals) {
            automaton.set_final(*state, *is_final).unwrap();
        }
        automaton.set_initial(states[initial], true).unwrap();
        for (from, to, label) in edges {
            automaton.add_transition(states[from], states[to], LABELS[label]).unwrap();
        }
        Fixture { automaton, states }
    }
}

fn arbitrary_sequence() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(LABELS.to_vec()), 1..8)
        .prop_map(|labels| labels.into_iter().map(str::to_string).collect())
}

/// Subset simulation used as an independent oracle.
fn simulate(automaton: &Automaton, sequence: &[String]) -> bool {
    let mut current: BTreeSet<StateId> = automaton.initial_state().map(|s| s.id()).into_iter().collect();
    for label in sequence {
        current = current
            .iter()
            .flat_map(|state| automaton.transitions_from(*state, label.as_str()).map(|t| t.to()))
            .collect();
    }
    current
        .iter()
        .any(|state| automaton.state(*state).is_some_and(|s| s.is_final()))
}

proptest! {
    #[test]
    fn verdict_matches_subset_simulation(
        fixture in arbitrary_fixture(),
        sequence in arbitrary_sequence(),
    ) {
        let verdict = accepts(&fixture.automaton, &sequence).unwrap();
        prop_assert_eq!(verdict.accepted, simulate(&fixture.automaton, &sequence));
    }

    #[test]
    fn verify_is_deterministic(
        fixture in arbitrary_fixture(),
        sequence in arbitrary_sequence(),
    ) {
        let first = accepts(&fixture.automaton, &sequence).unwrap();
        let second = accepts(&fixture.automaton, &sequence).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn failure_memo_never_changes_verdict(
        fixture in arbitrary_fixture(),
        sequence in arbitrary_sequence(),
    ) {
        let memo = AcceptanceEngine::default().accepts(&fixture.automaton, &sequence).unwrap();
        let plain = AcceptanceEngine::new(SearchOptions::default().with_failure_memo(false))
            .accepts(&fixture.automaton, &sequence)
            .unwrap();
        prop_assert_eq!(memo.accepted, plain.accepted);
        prop_assert!(memo.stats.frames <= plain.stats.frames);
    }

    #[test]
    fn frames_are_bounded_by_pairs(
        fixture in arbitrary_fixture(),
        sequence in arbitrary_sequence(),
    ) {
        let verdict = accepts(&fixture.automaton, &sequence).unwrap();
        let bound = fixture.automaton.state_count() * (sequence.len() + 1);
        prop_assert!(verdict.stats.frames <= bound);
    }

    #[test]
    fn accepting_trace_is_a_real_run(
        fixture in arbitrary_fixture(),
        sequence in arbitrary_sequence(),
    ) {
        let verdict = accepts(&fixture.automaton, &sequence).unwrap();
        if verdict.accepted {
            let trace = verdict.trace.unwrap();
            let automaton = &fixture.automaton;

            prop_assert_eq!(Some(trace.start()), automaton.initial_state().map(|s| s.id()));
            prop_assert!(automaton.state(trace.end()).unwrap().is_final());
            prop_assert_eq!(trace.labels(), sequence.iter().map(String::as_str).collect::<Vec<_>>());
            for step in trace.steps() {
                let transition = automaton.transition(step.transition).unwrap();
                prop_assert_eq!(transition.from(), step.from);
                prop_assert_eq!(transition.to(), step.to);
                prop_assert_eq!(transition.label(), step.label.as_str());
            }
        }
    }

    #[test]
    fn record_round_trip_preserves_structure(fixture in arbitrary_fixture()) {
        let record = fixture.automaton.snapshot();
        let reloaded = from_record(&record).unwrap();

        prop_assert_eq!(reloaded.snapshot(), record);
        prop_assert_eq!(reloaded.state_count(), fixture.automaton.state_count());
        prop_assert_eq!(reloaded.transition_count(), fixture.automaton.transition_count());
    }

    #[test]
    fn at_most_one_initial_state(
        fixture in arbitrary_fixture(),
        ops in prop::collection::vec((0..6usize, any::<bool>()), 0..20),
    ) {
        let mut automaton = fixture.automaton.clone();
        for (index, value) in ops {
            let state = fixture.states[index % fixture.states.len()];
            automaton.set_initial(state, value).unwrap();
            let initial = automaton.states().filter(|s| s.is_initial()).count();
            prop_assert!(initial <= 1);
        }
    }

    #[test]
    fn removing_a_state_removes_its_transitions(
        fixture in arbitrary_fixture(),
        victim in 0..6usize,
    ) {
        let mut automaton = fixture.automaton.clone();
        let state = fixture.states[victim % fixture.states.len()];
        let before = automaton.transition_count();
        let touching = automaton.transitions().filter(|t| t.touches(state)).count();

        automaton.remove_state(state).unwrap();

        prop_assert!(automaton.transitions().all(|t| !t.touches(state)));
        prop_assert_eq!(automaton.transition_count(), before - touching);
    }
}
