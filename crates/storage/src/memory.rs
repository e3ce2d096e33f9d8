//! In-memory document store
//!
//! # Design
//!
//! - DashMap keyed by document id: sharded, lock-free reads
//! - Ids are UUID v4 strings, so every insert gets a fresh id
//! - `bulk_delete` counts only ids that were present, like a database
//!   `delete where _id in (...)` would
//!
//! Used as the storage collaborator in tests. Documents are stored as given,
//! stamp included, so tests can read provenance back.

use crate::{Document, DocumentStore};
use dashmap::DashMap;
use testmark_core::{DocumentId, Result, StampedMetadata};
use uuid::Uuid;

/// Thread-safe in-memory [`DocumentStore`]
///
/// # Example
///
/// ```ignore
/// use testmark_storage::{DocumentStore, MemoryStore};
///
/// let store = MemoryStore::new();
/// let id = store.insert(serde_json::json!({ "name": "Alice" }))?;
/// assert!(store.contains(&id));
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: DashMap<DocumentId, Document>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of a stored document
    pub fn get(&self, id: &DocumentId) -> Option<Document> {
        self.docs.get(id).map(|doc| doc.value().clone())
    }

    /// Check if a document exists
    pub fn contains(&self, id: &DocumentId) -> bool {
        self.docs.contains_key(id)
    }

    /// Count how many of `ids` still exist
    pub fn count(&self, ids: &[DocumentId]) -> usize {
        ids.iter().filter(|id| self.docs.contains_key(*id)).count()
    }

    /// Total number of stored documents
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Check if the store holds no documents
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Ids of documents stamped by `filename` under `field`
    ///
    /// Full scan. Meant for auditing leftovers, not for cleanup.
    pub fn stamped_by(&self, field: &str, filename: &str) -> Vec<DocumentId> {
        let mut ids: Vec<DocumentId> = self
            .docs
            .iter()
            .filter(|entry| {
                matches!(
                    StampedMetadata::read_from(entry.value(), field),
                    Ok(Some(stamp)) if stamp.filename == filename
                )
            })
            .map(|entry| entry.key().clone())
            .collect();
        ids.sort();
        ids
    }
}

impl DocumentStore for MemoryStore {
    fn insert(&self, document: Document) -> Result<DocumentId> {
        let id = DocumentId::new(Uuid::new_v4().simple().to_string());
        self.docs.insert(id.clone(), document);
        Ok(id)
    }

    fn bulk_delete(&self, ids: &[DocumentId]) -> Result<u64> {
        let deleted = ids
            .iter()
            .filter(|id| self.docs.remove(*id).is_some())
            .count() as u64;
        tracing::trace!(requested = ids.len(), deleted, "bulk delete");
        Ok(deleted)
    }
}
