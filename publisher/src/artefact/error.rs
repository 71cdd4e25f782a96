//! Error types for artefact values: digests and manifests.
//!
//! Each variant names the invalid input and the constraint it broke.

use thiserror::Error;

/// Errors arising from invalid artefact-related values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArtefactError {
    /// A raw digest did not have the SHA-256 length.
    #[error("invalid SHA-256 digest: expected {expected} bytes, got {actual}")]
    InvalidDigestLength {
        /// The required length in bytes.
        expected: usize,
        /// The length that was supplied.
        actual: usize,
    },

    /// The base64 text of a manifest digest could not be decoded.
    #[error("invalid SHA-256 digest encoding: {reason}")]
    InvalidDigestEncoding {
        /// Description of the decoding failure.
        reason: String,
    },

    /// Manifest JSON could not be parsed.
    #[error("malformed manifest: {reason}")]
    MalformedManifest {
        /// Description of the parse failure.
        reason: String,
    },
}

/// Result type alias using [`ArtefactError`].
pub type Result<T> = std::result::Result<T, ArtefactError>;
