//! Identifier index: which documents did a test file (or tag) create?
//!
//! ## Design
//!
//! Two-level mapping instead of prefix scanning over composite strings:
//!
//! ```text
//! DashMap<TestFile, Mutex<FileBucket>>
//!                         ├── untagged: [id, id, ...]
//!                         └── tagged:   { tag -> [id, id, ...] }
//! ```
//!
//! - Exact lookup (`file!tag`): one map lookup per level
//! - File-wide lookup (`file`): every bucket of one file, O(tags in file)
//! - Files never contend: each has its own mutex, DashMap shards the rest
//!
//! A file-wide key never matches a sibling file whose name merely starts
//! with the same characters (`a.rs` does not match `a.rs.bak`).
//!
//! ## Critical sections
//!
//! [`IdentifierIndex::transaction`] runs a closure while holding the file's
//! mutex. Cleanup uses it for lookup -> delete -> verify -> purge, so no
//! other cleanup or registration for the same file can interleave.
//!
//! File slots are never dropped from the outer map once created; a slot whose
//! buckets are all empty behaves exactly like an absent one.

use crate::bucket::FileBucket;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use testmark_core::{DocumentId, IndexKey, TestFile};

/// Map from (test file, optional tag) to the ids registered under it
///
/// # Thread Safety
///
/// `IdentifierIndex` is `Send + Sync` and is meant to be shared behind an
/// `Arc`. All operations take `&self`.
///
/// # Example
///
/// ```ignore
/// use testmark_index::IdentifierIndex;
///
/// let index = IdentifierIndex::new();
/// index.add(&"suite.rs".parse()?, "1".into());
/// index.add(&"suite.rs!alpha".parse()?, "2".into());
///
/// assert_eq!(index.find(&"suite.rs".parse()?).len(), 2);
/// assert_eq!(index.find(&"suite.rs!alpha".parse()?).len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct IdentifierIndex {
    files: DashMap<TestFile, Arc<Mutex<FileBucket>>>,
}

impl IdentifierIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, file: &TestFile) -> Arc<Mutex<FileBucket>> {
        if let Some(slot) = self.files.get(file) {
            return Arc::clone(slot.value());
        }
        Arc::clone(self.files.entry(file.clone()).or_default().value())
    }

    fn existing(&self, file: &TestFile) -> Option<Arc<Mutex<FileBucket>>> {
        self.files.get(file).map(|slot| Arc::clone(slot.value()))
    }

    /// Register `id` under `key`
    ///
    /// Creates the bucket if absent. Ids are assigned once by the store, so
    /// no uniqueness check is made.
    pub fn add(&self, key: &IndexKey, id: DocumentId) {
        tracing::debug!(key = %key, id = %id, "registered document");
        self.slot(key.file()).lock().push(key.tag().cloned(), id);
    }

    /// Ids registered under `key`
    ///
    /// A tagged key returns exactly that tag's ids. A file-wide key returns
    /// the ids of every bucket of the file, untagged included. Ids come back
    /// in registration order; an unknown key yields an empty vector.
    pub fn find(&self, key: &IndexKey) -> Vec<DocumentId> {
        self.existing(key.file())
            .map(|slot| slot.lock().find(key.tag()))
            .unwrap_or_default()
    }

    /// Drop `key` and every id under it
    ///
    /// A file-wide key drops every bucket of the file. Returns the number of
    /// ids dropped; 0 when the key is absent.
    pub fn remove(&self, key: &IndexKey) -> usize {
        self.existing(key.file())
            .map(|slot| slot.lock().remove(key.tag()))
            .unwrap_or(0)
    }

    /// Whether at least one id is registered under `key`
    pub fn contains_key(&self, key: &IndexKey) -> bool {
        self.existing(key.file())
            .map(|slot| slot.lock().contains(key.tag()))
            .unwrap_or(false)
    }

    /// Run `f` with exclusive access to `file`'s buckets
    ///
    /// Registrations and other transactions for the same file wait until
    /// `f` returns. Other files are unaffected.
    pub fn transaction<R, F>(&self, file: &TestFile, f: F) -> R
    where
        F: FnOnce(&mut FileBucket) -> R,
    {
        let slot = self.slot(file);
        let mut guard = slot.lock();
        f(&mut guard)
    }

    /// Like [`transaction`](Self::transaction), but only for a file that
    /// already has a slot
    ///
    /// Returns `None` without running `f` or creating a slot when nothing
    /// was ever registered under `file`.
    pub fn transaction_existing<R, F>(&self, file: &TestFile, f: F) -> Option<R>
    where
        F: FnOnce(&mut FileBucket) -> R,
    {
        let slot = self.existing(file)?;
        let mut guard = slot.lock();
        Some(f(&mut guard))
    }

    /// Number of file slots, including files whose buckets are empty
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// All non-empty keys, sorted
    pub fn keys(&self) -> Vec<IndexKey> {
        let mut keys: Vec<IndexKey> = self
            .files
            .iter()
            .flat_map(|entry| {
                let file = entry.key().clone();
                let tags = entry.value().lock().tags();
                tags.into_iter()
                    .map(move |tag| IndexKey::new(file.clone(), tag))
            })
            .collect();
        keys.sort();
        keys
    }

    /// Total number of registered ids
    pub fn len(&self) -> usize {
        self.files
            .iter()
            .map(|entry| entry.value().lock().len())
            .sum()
    }

    /// Whether no ids are registered at all
    pub fn is_empty(&self) -> bool {
        self.files
            .iter()
            .all(|entry| entry.value().lock().is_empty())
    }
}
