//! TestMarker Comprehensive Test Suite
//!
//! Drives the public API end to end against an in-memory store:
//! - basic_ops: stamping and untagged insert/cleanup
//! - tagging: tag isolation and tag reset
//! - cleanup: idempotence and cross-file isolation
//! - failures: preconditions, storage errors, count mismatches
//! - concurrency: parallel inserts and cleanups
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test marker_comprehensive
//! cargo test --test marker_comprehensive tagging::
//! ```

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Once};

use serde_json::json;
use testmark::{Document, DocumentId, DocumentStore, Error, MemoryStore, Result, TestMarker};

// Test modules
pub mod basic_ops;
pub mod concurrency;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

static TRACING: Once = Once::new();

/// Route tracing output through the test harness
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// Create a marker over a fresh in-memory store
pub fn create_marker() -> (Arc<MemoryStore>, TestMarker) {
    init_tracing();
    let store = Arc::new(MemoryStore::new());
    let marker = TestMarker::new(Arc::clone(&store));
    (store, marker)
}

/// Create a marker with its test file already set
pub fn create_marker_for(file: &str) -> (Arc<MemoryStore>, TestMarker) {
    let (store, marker) = create_marker();
    marker.set_test_file(file).unwrap();
    (store, marker)
}

/// Create a marker over a fault-injecting store
pub fn create_faulty_marker(file: &str) -> (Arc<FaultyStore>, TestMarker) {
    init_tracing();
    let store = Arc::new(FaultyStore::default());
    let marker = TestMarker::new(Arc::clone(&store));
    marker.set_test_file(file).unwrap();
    (store, marker)
}

/// A small random-looking test document, like a fixture factory would make
pub fn test_document(n: usize) -> Document {
    json!({
        "foo": format!("BAR-{}", n * 7919 % 100_000),
        "bar": format!("BAZ-{}", n * 104_729 % 100_000),
    })
}

/// Insert `n` documents through the session API
pub fn insert_documents(marker: &TestMarker, n: usize) -> Vec<DocumentId> {
    (0..n)
        .map(|i| marker.insert(test_document(i)).unwrap())
        .collect()
}

// =============================================================================
// FAULT INJECTION
// =============================================================================

/// MemoryStore wrapper that can fail or under-report on demand
#[derive(Default)]
pub struct FaultyStore {
    pub inner: MemoryStore,
    /// Fail every insert
    pub fail_inserts: AtomicBool,
    /// Fail every bulk delete before touching anything
    pub fail_deletes: AtomicBool,
    /// Subtract this from every reported delete count
    pub under_report: AtomicU64,
    /// Number of insert calls that reached the store
    pub insert_calls: AtomicUsize,
    /// Number of bulk delete calls that reached the store
    pub delete_calls: AtomicUsize,
}

impl DocumentStore for FaultyStore {
    fn insert(&self, document: Document) -> Result<DocumentId> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(Error::Storage("insert rejected".into()));
        }
        self.inner.insert(document)
    }

    fn bulk_delete(&self, ids: &[DocumentId]) -> Result<u64> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(Error::Storage("connection reset".into()));
        }
        let deleted = self.inner.bulk_delete(ids)?;
        Ok(deleted.saturating_sub(self.under_report.load(Ordering::SeqCst)))
    }
}
