//! Convenient imports for testmark.
//!
//! ```ignore
//! use testmark::prelude::*;
//!
//! let marker = TestMarker::new(Arc::new(MemoryStore::new()));
//! marker.set_test_file(file!())?;
//! ```

// Main entry point
pub use crate::marker::{TestMarker, TestMarkerBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Context and configuration
pub use testmark_core::{MarkerOptions, Tag, TestContext, TestFile};

// Storage
pub use testmark_storage::{Document, DocumentStore, MemoryStore};
pub use testmark_core::DocumentId;

pub use std::sync::Arc;

// Re-export serde_json for convenience
pub use serde_json::json;
