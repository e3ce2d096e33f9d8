//! Error types for testmark.
//!
//! Errors fall into three groups:
//!
//! | Group | Variants | Retry? |
//! |-------|----------|--------|
//! | Precondition | `MissingTestFile`, `MissingTag`, `InvalidDocument` | No, programmer error |
//! | Storage | `Storage` | Yes, index untouched |
//! | Verification | `CountMismatch` | Yes, index untouched |
//!
//! A cleanup that fails for a storage or verification reason never purges
//! anything from the identifier index, so the same call can simply be
//! repeated later.

use thiserror::Error;

/// All testmark errors.
#[derive(Debug, Error)]
pub enum Error {
    /// No test file configured, or an empty test file name was given
    #[error("You must specify a test filename. Please see `set_test_file(name)`.")]
    MissingTestFile,

    /// An empty tag name was given
    #[error("You must specify a tag name. Please see `set_test_tag(tag)`.")]
    MissingTag,

    /// The document cannot carry stamped metadata
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// The document store failed an insert or a bulk delete
    #[error("storage error: {0}")]
    Storage(String),

    /// A bulk delete removed a different number of documents than were tracked
    #[error("bulk delete for {key} removed {deleted} documents, expected {expected}")]
    CountMismatch {
        /// Index key the cleanup ran for
        key: String,
        /// Number of identifiers tracked under the key
        expected: usize,
        /// Number of documents the store reported as deleted
        deleted: u64,
    },

    /// Metadata could not be encoded
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for testmark operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error signals a programmer error.
    ///
    /// Precondition failures abort the current operation and must not be
    /// retried; the caller has to fix its setup first.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Error::MissingTestFile | Error::MissingTag | Error::InvalidDocument(_)
        )
    }

    /// Check if this error is retryable.
    ///
    /// Storage failures and count mismatches leave the identifier index
    /// unchanged, so repeating the whole operation is safe.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Storage(_) | Error::CountMismatch { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
