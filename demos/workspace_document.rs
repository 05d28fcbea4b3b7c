//! Workspace Document
//!
//! This example saves an editing session and opens it again.
//!
//! Key concepts:
//! - Editing an automaton through stable state identities
//! - Action catalog that remembers labels after their transitions are deleted
//! - JSON documents for readability, binary documents for compactness
//! - Strict loading of records with duplicate state names
//!
//! Run with: cargo run --example workspace_document

use nfa_lab::{
    from_record_with, Automaton, AutomatonDocument, AutomatonRecord, LoadOptions, Position,
    QuerySequence,
};
use std::fs;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Workspace Document Example ===\n");

    let mut automaton = Automaton::new();
    let draft = automaton.add_state_at("Draft", Position::new(40.0, 60.0));
    let review = automaton.add_state_at("Review", Position::new(160.0, 60.0));
    let published = automaton.add_state_at("Published", Position::new(280.0, 60.0));
    automaton.set_initial(draft, true).unwrap();
    automaton.set_final(published, true).unwrap();

    automaton.add_transition(draft, review, "submit").unwrap();
    automaton.add_transition(review, draft, "reject").unwrap();
    automaton.add_transition(review, published, "approve").unwrap();
    let shortcut = automaton.add_transition(draft, published, "force").unwrap();
    automaton.remove_transition(shortcut);

    let mut sequence = QuerySequence::new();
    sequence.push("submit");
    sequence.push("approve");

    println!("Action catalog: {:?}", automaton.action_catalog());
    println!("Sequence accepted: {}", automaton.verify(sequence.labels()).unwrap().accepted);

    // Save as JSON
    let document = AutomatonDocument::capture(&automaton, &sequence);
    let json = document.to_json().unwrap();
    let path = std::env::temp_dir().join(format!("{}.nfa.json", document.id));
    fs::write(&path, &json).unwrap();
    println!("\nSaved {} bytes of JSON to {}", json.len(), path.display());

    // Binary is smaller
    let bytes = document.to_binary().unwrap();
    println!("Binary form is {} bytes", bytes.len());

    // Reopen into a fresh workspace
    let mut reopened = Automaton::new();
    let text = fs::read_to_string(&path).unwrap();
    let restored_sequence = AutomatonDocument::from_json(&text)
        .unwrap()
        .restore_into(&mut reopened, &LoadOptions::default())
        .unwrap();
    fs::remove_file(&path).unwrap();

    println!("\nReopened {} states and {} transitions", reopened.state_count(), reopened.transition_count());
    println!("Action catalog: {:?}", reopened.action_catalog());
    println!(
        "Sequence {:?} accepted: {}",
        restored_sequence.labels(),
        reopened.verify(restored_sequence.labels()).unwrap().accepted
    );

    // Two states share a name; strict loading refuses to guess.
    let mut ambiguous = AutomatonRecord::from_json(&reopened.snapshot().to_json().unwrap()).unwrap();
    let twin = ambiguous.states[1].clone();
    ambiguous.states.push(twin);
    match from_record_with(&ambiguous, &LoadOptions::strict()) {
        Ok(_) => println!("\nStrict load succeeded"),
        Err(err) => println!("\nStrict load failed: {}", err),
    }
    let lenient = from_record_with(&ambiguous, &LoadOptions::default()).unwrap();
    println!("Lenient load kept {} transitions", lenient.transition_count());

    println!("\n=== Example Complete ===");
}
