//! Document error types.

use crate::core::AutomatonError;
use thiserror::Error;

/// Errors raised while saving or opening a workspace document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document could not be written as JSON or binary
    #[error("Document encoding failed: {0}")]
    EncodingFailed(String),

    /// The bytes or text are not a readable document
    #[error("Document decoding failed: {0}")]
    DecodingFailed(String),

    /// The document was written by an incompatible format revision
    #[error("Document format version {found} cannot be opened (expected {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The embedded automaton record failed to load
    #[error(transparent)]
    Invalid(#[from] AutomatonError),
}
