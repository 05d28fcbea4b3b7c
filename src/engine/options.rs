//! Search configuration.

use serde::{Deserialize, Serialize};

/// Options for the acceptance engine.
///
/// Neither option changes whether a sequence is accepted.
///
/// # Example
///
/// ```rust
/// use nfa_lab::SearchOptions;
///
/// let options = SearchOptions::default().with_trace(false);
/// assert!(!options.record_trace);
/// assert!(options.memoize_failures);
///
/// let parsed: SearchOptions = serde_json::from_str(r#"{"memoize_failures": false}"#).unwrap();
/// assert!(parsed.record_trace);
/// assert!(!parsed.memoize_failures);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Produce a trace of visited states alongside the verdict.
    pub record_trace: bool,

    /// Skip `(state, position)` pairs already proven to fail.
    pub memoize_failures: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            record_trace: true,
            memoize_failures: true,
        }
    }
}

impl SearchOptions {
    /// Turn trace recording on or off.
    pub fn with_trace(mut self, record: bool) -> Self {
        self.record_trace = record;
        self
    }

    /// Turn the failure memo on or off.
    pub fn with_failure_memo(mut self, memoize: bool) -> Self {
        self.memoize_failures = memoize;
        self
    }
}
