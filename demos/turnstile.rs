//! Turnstile
//!
//! This example builds a small nondeterministic automaton and replays the
//! search step by step, the way an editor would animate it.
//!
//! Key concepts:
//! - Declarative construction with the `automaton!` macro
//! - Parallel transitions sharing a label
//! - Observing visits and backtracks with a `Recorder`
//! - Cancelling a search from a closure observer
//!
//! Run with: RUST_LOG=nfa_lab=trace cargo run --example turnstile

use nfa_lab::engine::Recorder;
use nfa_lab::{automaton, AcceptanceEngine, SearchOutcome, Visit};
use std::ops::ControlFlow;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Turnstile Example ===\n");

    // "coin" from Locked is ambiguous: one branch jams.
    let turnstile = automaton! {
        states: [Locked, Unlocked, Jammed]
        initial: Locked
        final: [Locked]
        transitions: [
            Locked -> Jammed : "coin",
            Locked -> Unlocked : "coin",
            Unlocked -> Locked : "push",
            Unlocked -> Unlocked : "coin",
        ]
    }
    .unwrap();

    println!(
        "{} states, {} transitions, actions: {:?}",
        turnstile.state_count(),
        turnstile.transition_count(),
        turnstile.action_catalog()
    );

    let engine = AcceptanceEngine::default();
    let name = |id| turnstile.state(id).map_or("?", |s| s.name());

    for sequence in [
        vec!["coin", "push"],
        vec!["coin", "coin", "push"],
        vec!["push"],
        vec!["coin"],
    ] {
        let mut recorder = Recorder::new();
        let outcome = engine.run(&turnstile, &sequence, &mut recorder).unwrap();

        println!("\nSequence {:?}", sequence);
        for visit in recorder.visits() {
            println!(
                "  visit {:<8} after {} action(s){}",
                name(visit.state),
                visit.consumed,
                if visit.is_final { " [final]" } else { "" }
            );
        }
        println!("  backtracks: {}", recorder.backtracks());

        if let SearchOutcome::Completed(verdict) = outcome {
            let path: Vec<&str> = verdict
                .trace
                .map(|t| t.path().into_iter().map(name).collect())
                .unwrap_or_default();
            let status = if verdict.accepted { "accepted" } else { "rejected" };
            println!("  {} via {:?}", status, path);
        }
    }

    println!("\nStopping a search after two visits:");
    let mut budget = 2;
    let mut stop_early = |_visit: Visit| {
        budget -= 1;
        if budget == 0 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    };
    let outcome = engine
        .run(&turnstile, &["coin", "push"], &mut stop_early)
        .unwrap();
    println!("  cancelled: {}", outcome.is_cancelled());

    println!("\n=== Example Complete ===");
}
