//! Record validation that reports every problem at once.
//!
//! Loading stops at the first problem; editors that want to show the user
//! everything wrong with a file call [`validate_record`] directly.

use super::{AutomatonRecord, LoadOptions, NameResolution};
use crate::core::AutomatonError;
use std::collections::HashMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<AutomatonError>>;

/// Validate a record, accumulating ALL problems.
///
/// # Example
///
/// ```rust
/// use nfa_lab::{validate_record, AutomatonRecord, LoadOptions};
/// use stillwater::validation::Validation;
///
/// let json = r#"{
///     "states": [],
///     "transitions": [ { "from": "A", "to": "B", "label": "x" } ]
/// }"#;
/// let record = AutomatonRecord::from_json(json).unwrap();
///
/// match validate_record(&record, &LoadOptions::default()) {
///     Validation::Failure(issues) => assert_eq!(issues.len(), 2),
///     Validation::Success(_) => panic!("expected failures"),
/// }
/// ```
pub fn validate_record(record: &AutomatonRecord, options: &LoadOptions) -> Check {
    let mut checks = vec![single_initial(record)];

    checks.extend(record.states.iter().map(|state| -> Check {
        if state.position.is_finite() {
            Validation::success(())
        } else {
            Validation::fail(AutomatonError::MalformedRecord(format!(
                "state '{}' has a non-finite position",
                state.name
            )))
        }
    }));

    let counts = name_counts(record);
    checks.extend(
        referenced_names(record)
            .into_iter()
            .map(|name| endpoint(name, &counts, options.names)),
    );

    Validation::all_vec(checks).map(|_| ())
}

fn single_initial(record: &AutomatonRecord) -> Check {
    let initial = record.states.iter().filter(|s| s.is_initial).count();
    if initial > 1 {
        Validation::fail(AutomatonError::MalformedRecord(format!(
            "{initial} states are marked initial"
        )))
    } else {
        Validation::success(())
    }
}

fn endpoint(name: &str, counts: &HashMap<&str, usize>, names: NameResolution) -> Check {
    match counts.get(name).copied().unwrap_or(0) {
        0 => Validation::fail(AutomatonError::unknown_name(name)),
        matches if matches > 1 && names == NameResolution::Strict => {
            Validation::fail(AutomatonError::AmbiguousName {
                name: name.to_string(),
                matches,
            })
        }
        _ => Validation::success(()),
    }
}

fn name_counts(record: &AutomatonRecord) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for state in &record.states {
        *counts.entry(state.name.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Distinct endpoint names in first-reference order.
fn referenced_names(record: &AutomatonRecord) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for transition in &record.transitions {
        for name in [transition.from.as_str(), transition.to.as_str()] {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

/// Referenced names that more than one state carries.
pub(crate) fn ambiguous_references(record: &AutomatonRecord) -> Vec<&str> {
    let counts = name_counts(record);
    referenced_names(record)
        .into_iter()
        .filter(|name| counts.get(name).is_some_and(|&n| n > 1))
        .collect()
}

pub(crate) fn first_issue(issues: &NonEmptyVec<AutomatonError>) -> AutomatonError {
    issues
        .iter()
        .next()
        .cloned()
        .unwrap_or_else(|| AutomatonError::MalformedRecord("record failed validation".to_string()))
}
