//! Workspace documents: what gets written to disk when a user saves.
//!
//! A document carries the automaton record together with the action catalog
//! and the query sequence being edited, so reopening a file restores the
//! whole workspace. Choosing, reading and writing the file is left to the
//! caller; this module only converts to and from bytes.

use super::error::DocumentError;
use super::{build, to_record, AutomatonRecord, LoadOptions};
use crate::core::{Automaton, QuerySequence};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Version identifier for document format
pub const DOCUMENT_VERSION: u32 = 1;

/// Serializable workspace contents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AutomatonDocument {
    /// Document format version
    pub version: u32,

    /// Unique document identifier
    pub id: String,

    /// When the document was captured
    pub saved_at: DateTime<Utc>,

    pub automaton: AutomatonRecord,

    /// Action catalog at capture time, in first-use order
    pub actions: Vec<String>,

    /// Query sequence at capture time
    pub sequence: QuerySequence,
}

impl AutomatonDocument {
    /// Capture the current workspace.
    pub fn capture(automaton: &Automaton, sequence: &QuerySequence) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            id: Uuid::new_v4().to_string(),
            saved_at: Utc::now(),
            automaton: to_record(automaton),
            actions: automaton.action_catalog().to_vec(),
            sequence: sequence.clone(),
        }
    }

    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self).map_err(|e| DocumentError::EncodingFailed(e.to_string()))
    }

    /// Decode from JSON, rejecting unsupported versions.
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        let document: Self =
            serde_json::from_str(text).map_err(|e| DocumentError::DecodingFailed(e.to_string()))?;
        document.check_version()?;
        Ok(document)
    }

    /// Encode in the compact binary form.
    pub fn to_binary(&self) -> Result<Vec<u8>, DocumentError> {
        bincode::serialize(self).map_err(|e| DocumentError::EncodingFailed(e.to_string()))
    }

    /// Decode from the binary form, rejecting unsupported versions.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, DocumentError> {
        let document: Self =
            bincode::deserialize(bytes).map_err(|e| DocumentError::DecodingFailed(e.to_string()))?;
        document.check_version()?;
        Ok(document)
    }

    fn check_version(&self) -> Result<(), DocumentError> {
        if self.version != DOCUMENT_VERSION {
            return Err(DocumentError::UnsupportedVersion {
                found: self.version,
                supported: DOCUMENT_VERSION,
            });
        }
        Ok(())
    }

    /// Replace `automaton` with the document's contents and return the saved
    /// query sequence.
    ///
    /// The catalog is seeded with the saved actions first, so labels whose
    /// transitions were deleted before saving are kept in their original
    /// order. On error `automaton` is unchanged.
    pub fn restore_into(
        &self,
        automaton: &mut Automaton,
        options: &LoadOptions,
    ) -> Result<QuerySequence, DocumentError> {
        self.check_version()?;
        let rebuilt = build(&self.automaton, options, &self.actions)?;
        *automaton = rebuilt;
        debug!(document = %self.id, "document restored");
        Ok(self.sequence.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AutomatonError, Position};

    fn workspace() -> (Automaton, QuerySequence) {
        let mut automaton = Automaton::new();
        let a = automaton.add_state_at("A", Position::new(10.0, 20.0));
        let b = automaton.add_state_at("B", Position::new(90.0, 20.0));
        automaton.set_initial(a, true).unwrap();
        automaton.set_final(b, true).unwrap();
        let dropped = automaton.add_transition(a, a, "reset").unwrap();
        automaton.add_transition(a, b, "go").unwrap();
        automaton.remove_transition(dropped);

        let sequence: QuerySequence = ["go"].into_iter().collect();
        (automaton, sequence)
    }

    #[test]
    fn capture_records_catalog_and_sequence() {
        let (automaton, sequence) = workspace();
        let document = AutomatonDocument::capture(&automaton, &sequence);

        assert_eq!(document.version, DOCUMENT_VERSION);
        assert_eq!(document.actions, vec!["reset", "go"]);
        assert_eq!(document.sequence, sequence);
        assert_eq!(document.automaton.transitions.len(), 1);
        assert!(Uuid::parse_str(&document.id).is_ok());
    }

    #[test]
    fn json_document_restores_workspace() {
        let (automaton, sequence) = workspace();
        let json = AutomatonDocument::capture(&automaton, &sequence).to_json().unwrap();

        let document = AutomatonDocument::from_json(&json).unwrap();
        let mut restored = Automaton::new();
        let restored_sequence = document.restore_into(&mut restored, &LoadOptions::default()).unwrap();

        assert_eq!(restored_sequence, sequence);
        assert_eq!(restored.action_catalog(), ["reset", "go"]);
        assert_eq!(restored.snapshot(), automaton.snapshot());
        assert!(restored.verify(restored_sequence.labels()).unwrap().accepted);
    }

    #[test]
    fn binary_document_matches_json_document() {
        let (automaton, sequence) = workspace();
        let document = AutomatonDocument::capture(&automaton, &sequence);

        let bytes = document.to_binary().unwrap();
        let decoded = AutomatonDocument::from_binary(&bytes).unwrap();

        assert_eq!(decoded, document);
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let (automaton, sequence) = workspace();
        let mut document = AutomatonDocument::capture(&automaton, &sequence);
        document.version = DOCUMENT_VERSION + 1;
        let json = serde_json::to_string(&document).unwrap();

        let result = AutomatonDocument::from_json(&json);
        assert!(matches!(
            result,
            Err(DocumentError::UnsupportedVersion { found, supported })
                if found == DOCUMENT_VERSION + 1 && supported == DOCUMENT_VERSION
        ));
    }

    #[test]
    fn errors_describe_documents() {
        let version = DocumentError::UnsupportedVersion {
            found: 7,
            supported: DOCUMENT_VERSION,
        };
        assert_eq!(
            version.to_string(),
            "Document format version 7 cannot be opened (expected 1)"
        );

        let decoding = AutomatonDocument::from_json("[]").unwrap_err();
        assert!(decoding.to_string().starts_with("Document decoding failed: "));
    }

    #[test]
    fn garbage_fails_to_decode() {
        assert!(matches!(
            AutomatonDocument::from_json("{ not json"),
            Err(DocumentError::DecodingFailed(_))
        ));
        assert!(matches!(
            AutomatonDocument::from_binary(&[1, 2, 3]),
            Err(DocumentError::DecodingFailed(_))
        ));
    }

    #[test]
    fn invalid_record_leaves_target_unchanged() {
        let (automaton, sequence) = workspace();
        let mut document = AutomatonDocument::capture(&automaton, &sequence);
        document.automaton.transitions[0].to = "missing".to_string();

        let mut target = Automaton::new();
        target.add_state("keep");

        let result = document.restore_into(&mut target, &LoadOptions::default());
        assert!(matches!(
            result,
            Err(DocumentError::Invalid(AutomatonError::UnknownState(_)))
        ));
        assert_eq!(target.state_count(), 1);
    }
}
