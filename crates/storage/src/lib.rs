//! Document store collaborator for testmark
//!
//! testmark does not talk to a database itself. It drives whatever store the
//! host application uses through [`DocumentStore`]:
//! - `insert`: persist one document, return the identifier the store assigned
//! - `bulk_delete`: delete a set of documents by identifier, return how many
//!   were actually deleted
//!
//! [`MemoryStore`] is an in-process implementation for unit and integration
//! tests.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;

pub use memory::MemoryStore;

use std::sync::Arc;
use testmark_core::{DocumentId, Result};

/// A document as handed to the store: a JSON object
pub type Document = serde_json::Value;

/// Storage backend driven by the marker
///
/// Implementations report failures as [`testmark_core::Error::Storage`].
/// `bulk_delete` must report the number of documents it really removed;
/// identifiers that no longer exist must not be counted. The marker compares
/// that count against the number of identifiers it asked to delete.
pub trait DocumentStore: Send + Sync {
    /// Persist `document` and return its new identifier
    fn insert(&self, document: Document) -> Result<DocumentId>;

    /// Delete every document in `ids`, returning the number deleted
    fn bulk_delete(&self, ids: &[DocumentId]) -> Result<u64>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for Arc<S> {
    fn insert(&self, document: Document) -> Result<DocumentId> {
        (**self).insert(document)
    }

    fn bulk_delete(&self, ids: &[DocumentId]) -> Result<u64> {
        (**self).bulk_delete(ids)
    }
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn insert(&self, document: Document) -> Result<DocumentId> {
        (**self).insert(document)
    }

    fn bulk_delete(&self, ids: &[DocumentId]) -> Result<u64> {
        (**self).bulk_delete(ids)
    }
}
