//! Test marker: the entry point for host applications.
//!
//! A [`TestMarker`] wraps one document store (one collection) and owns the
//! identifier index for it. It offers two ways to say which test is running:
//!
//! 1. **Session** - set once, used implicitly:
//!    `marker.set_test_file("suite.rs")?; marker.insert(doc)?`
//! 2. **Explicit** - pass a [`TestContext`] value:
//!    `marker.insert_in(&ctx, doc)?`
//!
//! ## Session concurrency
//!
//! The session is shared state. Change the file or tag only between groups
//! of inserts, never while inserts are in flight: an insert that starts
//! after `set_test_tag` is stamped with the new tag. Each call reads the
//! session exactly once, so a single insert is never split across two keys.
//! Hosts that run inserts for several tags concurrently should use the
//! explicit form.

use crate::cleanup;
use crate::error::{Error, Result};
use crate::hooks;
use parking_lot::RwLock;
use std::sync::Arc;
use testmark_core::{DocumentId, HostInfo, MarkerOptions, Tag, TestContext, TestFile};
use testmark_index::IdentifierIndex;
use testmark_storage::{Document, DocumentStore};

#[derive(Debug, Default)]
struct Session {
    file: Option<TestFile>,
    tag: Option<Tag>,
}

/// Stamps, tracks and cleans up the documents a test run creates
///
/// # Example
///
/// ```ignore
/// use testmark::prelude::*;
///
/// let store = Arc::new(MemoryStore::new());
/// let marker = TestMarker::new(store.clone());
///
/// marker.set_test_file(file!())?;
/// marker.insert(json!({ "name": "Alice" }))?;
///
/// marker.set_test_tag("admins")?;
/// marker.insert(json!({ "name": "Root" }))?;
///
/// marker.remove_tagged_test_documents("admins")?;  // Root is gone, Alice stays
/// marker.remove_all_test_documents()?;             // Alice is gone
/// ```
pub struct TestMarker {
    store: Arc<dyn DocumentStore>,
    index: IdentifierIndex,
    options: MarkerOptions,
    host: Arc<HostInfo>,
    session: RwLock<Session>,
}

impl TestMarker {
    /// Marker over `store` with default options
    pub fn new(store: impl DocumentStore + 'static) -> Self {
        Self::builder(store).build()
    }

    /// Builder for a marker over `store`
    pub fn builder(store: impl DocumentStore + 'static) -> TestMarkerBuilder {
        TestMarkerBuilder::new(Arc::new(store))
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Set the test file subsequent inserts are attributed to
    ///
    /// Must be called before the first session insert. Fails with
    /// `MissingTestFile` on an empty name.
    pub fn set_test_file(&self, name: impl Into<String>) -> Result<()> {
        let file = TestFile::new(name)?;
        self.session.write().file = Some(file);
        Ok(())
    }

    /// Scope subsequent inserts to `tag`
    ///
    /// Fails with `MissingTag` on an empty tag.
    pub fn set_test_tag(&self, tag: impl Into<String>) -> Result<()> {
        let tag = Tag::new(tag)?;
        self.session.write().tag = Some(tag);
        Ok(())
    }

    /// Return subsequent inserts to the untagged bucket
    pub fn clear_test_tag(&self) {
        self.session.write().tag = None;
    }

    /// Snapshot of the session
    ///
    /// Fails with `MissingTestFile` if no test file was set.
    pub fn context(&self) -> Result<TestContext> {
        let session = self.session.read();
        let file = session.file.clone().ok_or(Error::MissingTestFile)?;
        let ctx = TestContext::with_host(file, Arc::clone(&self.host));
        Ok(match &session.tag {
            Some(tag) => ctx.with_tag(tag.clone()),
            None => ctx,
        })
    }

    // =========================================================================
    // Insert
    // =========================================================================

    /// Insert `doc` under the session context
    pub fn insert(&self, doc: Document) -> Result<DocumentId> {
        if !self.options.enabled {
            return self.store.insert(doc);
        }
        let ctx = self.context()?;
        self.insert_in(&ctx, doc)
    }

    /// Insert `doc` under an explicit context
    ///
    /// Stamps the document, persists it, then registers the assigned id.
    /// A failed stamp or insert registers nothing.
    pub fn insert_in(&self, ctx: &TestContext, mut doc: Document) -> Result<DocumentId> {
        if !self.options.enabled {
            return self.store.insert(doc);
        }
        hooks::before_insert(ctx, &mut doc, &self.options)?;
        let id = self.store.insert(doc)?;
        hooks::after_insert(&self.index, ctx, id.clone());
        Ok(id)
    }

    // =========================================================================
    // Cleanup
    // =========================================================================

    /// Delete every document the session's test file created
    ///
    /// Returns Ok(0) without needing a test file when marking is disabled.
    /// On success the session tag is reset to untagged. On failure nothing
    /// changes and the call can be retried.
    pub fn remove_all_test_documents(&self) -> Result<u64> {
        if !self.options.enabled {
            return Ok(0);
        }
        let ctx = self.context()?;
        let deleted = self.remove_all_in(&ctx)?;
        self.clear_test_tag();
        Ok(deleted)
    }

    /// Delete the documents the session's test file created under `tag`
    ///
    /// On success the session tag is reset to untagged. On failure nothing
    /// changes and the call can be retried.
    pub fn remove_tagged_test_documents(&self, tag: impl Into<String>) -> Result<u64> {
        let tag = Tag::new(tag)?;
        if !self.options.enabled {
            return Ok(0);
        }
        let ctx = self.context()?;
        let deleted = self.remove_tagged_in(&ctx, &tag)?;
        self.clear_test_tag();
        Ok(deleted)
    }

    /// Delete every document created under `ctx`'s file
    pub fn remove_all_in(&self, ctx: &TestContext) -> Result<u64> {
        if !self.options.enabled {
            return Ok(0);
        }
        cleanup::remove_by_file(&self.index, &*self.store, ctx)
    }

    /// Delete the documents created under `ctx`'s file and `tag`
    pub fn remove_tagged_in(&self, ctx: &TestContext, tag: &Tag) -> Result<u64> {
        if !self.options.enabled {
            return Ok(0);
        }
        cleanup::remove_by_tag(&self.index, &*self.store, ctx, tag)
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// The identifier index backing this marker
    pub fn index(&self) -> &IdentifierIndex {
        &self.index
    }

    /// Options in effect
    pub fn options(&self) -> &MarkerOptions {
        &self.options
    }
}

/// Builder for [`TestMarker`]
///
/// ```ignore
/// let marker = TestMarker::builder(store)
///     .options(MarkerOptions::from_env())
///     .build();
/// ```
pub struct TestMarkerBuilder {
    store: Arc<dyn DocumentStore>,
    options: MarkerOptions,
    host: Option<Arc<HostInfo>>,
}

impl TestMarkerBuilder {
    fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            options: MarkerOptions::default(),
            host: None,
        }
    }

    /// Use `options` instead of the defaults
    pub fn options(mut self, options: MarkerOptions) -> Self {
        self.options = options;
        self
    }

    /// Stamp documents with `host` instead of the current process
    pub fn host(mut self, host: HostInfo) -> Self {
        self.host = Some(Arc::new(host));
        self
    }

    /// Build the marker
    pub fn build(self) -> TestMarker {
        TestMarker {
            store: self.store,
            index: IdentifierIndex::new(),
            options: self.options,
            host: self.host.unwrap_or_else(HostInfo::current),
            session: RwLock::new(Session::default()),
        }
    }
}
