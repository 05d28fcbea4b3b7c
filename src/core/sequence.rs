//! The ordered list of actions a user assembles for verification.

use serde::{Deserialize, Serialize};

/// Editable sequence of action labels.
///
/// Out-of-range edits are ignored rather than reported, matching how the
/// list is edited interactively (drop, reorder, remove).
///
/// # Example
///
/// ```rust
/// use nfa_lab::QuerySequence;
///
/// let mut sequence = QuerySequence::new();
/// sequence.push("coin");
/// sequence.push("push");
/// sequence.insert(0, "push");
/// assert!(sequence.move_item(0, 2));
///
/// assert_eq!(sequence.labels(), ["coin", "push", "push"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuerySequence {
    labels: Vec<String>,
}

impl QuerySequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a label.
    pub fn push(&mut self, label: impl Into<String>) {
        self.labels.push(label.into());
    }

    /// Insert before `index`; an index past the end appends.
    pub fn insert(&mut self, index: usize, label: impl Into<String>) {
        let index = index.min(self.labels.len());
        self.labels.insert(index, label.into());
    }

    /// Remove the label at `index`, if there is one.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.labels.len()).then(|| self.labels.remove(index))
    }

    /// Move the item at `from` so it ends up at position `to`.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        if from >= self.labels.len() || to >= self.labels.len() {
            return false;
        }
        let label = self.labels.remove(from);
        self.labels.insert(to, label);
        true
    }

    /// Remove every label.
    pub fn clear(&mut self) {
        self.labels.clear();
    }

    /// Labels in query order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if the sequence has no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl<L: Into<String>> FromIterator<L> for QuerySequence {
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl AsRef<[String]> for QuerySequence {
    fn as_ref(&self) -> &[String] {
        &self.labels
    }
}
