//! # testmark
//!
//! Provenance tagging and scoped cleanup for documents created by tests.
//!
//! Every document a test inserts is stamped with where it came from (process
//! id, host, test file, optional tag) and its id is tracked per test file and
//! tag. Cleanup then deletes exactly those documents in one bulk delete,
//! without scanning the collection and without touching data left by other
//! test files or concurrent runs.
//!
//! ## Quick Start
//!
//! ```ignore
//! use testmark::prelude::*;
//!
//! let store = Arc::new(MemoryStore::new());
//! let marker = TestMarker::new(store.clone());
//!
//! marker.set_test_file(file!())?;
//! let id = marker.insert(json!({ "name": "Alice" }))?;
//!
//! // Stored as {"name": "Alice", "__test": {"pid": .., "hostname": .., "filename": .., "tag": ""}}
//!
//! marker.remove_all_test_documents()?;
//! assert!(!store.contains(&id));
//! ```
//!
//! ## Layers
//!
//! - [`TestMarker`] - session and explicit-context API over one store
//! - [`hooks`] - `before_insert` / `after_insert` for hosts that run their own insert
//! - [`cleanup`] - `remove_by_tag` / `remove_by_file` over an index and a store
//! - [`IdentifierIndex`] - file -> tag -> ids
//! - [`DocumentStore`] - the storage collaborator

#![warn(missing_docs)]

pub mod cleanup;
mod error;
pub mod hooks;
mod marker;

pub mod prelude;

// Re-export main entry points
pub use error::{Error, Result};
pub use marker::{TestMarker, TestMarkerBuilder};

// Re-export building blocks
pub use testmark_core::{
    DocumentId, HostInfo, IndexKey, MarkerOptions, StampedMetadata, Tag, TestContext, TestFile,
};
pub use testmark_index::{FileBucket, IdentifierIndex};
pub use testmark_storage::{Document, DocumentStore, MemoryStore};
