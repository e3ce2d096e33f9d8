//! Test context: who is creating documents right now
//!
//! [`TestContext`] is an immutable value. Changing the test file or tag
//! produces a new context instead of mutating shared state, so an insert
//! that captured a context is stamped and indexed under exactly that
//! context even if the host switches tags while the insert is in flight.

use crate::metadata::StampedMetadata;
use crate::types::{IndexKey, Tag, TestFile};
use once_cell::sync::Lazy;
use std::sync::Arc;

static CURRENT_HOST: Lazy<Arc<HostInfo>> = Lazy::new(|| Arc::new(HostInfo::collect()));

/// Process and host the tests run in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    /// Operating system process id
    pub pid: u32,
    /// Host name, lossily converted to UTF-8
    pub hostname: String,
}

impl HostInfo {
    /// Host info of the current process, collected once per process
    pub fn current() -> Arc<HostInfo> {
        Arc::clone(&CURRENT_HOST)
    }

    fn collect() -> Self {
        HostInfo {
            pid: std::process::id(),
            hostname: gethostname::gethostname().to_string_lossy().into_owned(),
        }
    }
}

/// Snapshot of the active test file and tag
///
/// # Examples
///
/// ```
/// use testmark_core::{TestContext, TestFile, Tag};
///
/// let ctx = TestContext::new(TestFile::new("suite.rs").unwrap());
/// let tagged = ctx.with_tag(Tag::new("alpha").unwrap());
///
/// assert_eq!(ctx.index_key().to_string(), "suite.rs");
/// assert_eq!(tagged.index_key().to_string(), "suite.rs!alpha");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestContext {
    file: TestFile,
    tag: Option<Tag>,
    host: Arc<HostInfo>,
}

impl TestContext {
    /// Untagged context for `file` on the current host
    pub fn new(file: TestFile) -> Self {
        Self::with_host(file, HostInfo::current())
    }

    /// Untagged context with explicit host info
    pub fn with_host(file: TestFile, host: Arc<HostInfo>) -> Self {
        TestContext {
            file,
            tag: None,
            host,
        }
    }

    /// Same file and host, scoped to `tag`
    pub fn with_tag(&self, tag: Tag) -> Self {
        TestContext {
            tag: Some(tag),
            ..self.clone()
        }
    }

    /// Same file and host, back to the untagged bucket
    pub fn untagged(&self) -> Self {
        TestContext {
            tag: None,
            ..self.clone()
        }
    }

    /// Active test file
    pub fn file(&self) -> &TestFile {
        &self.file
    }

    /// Active tag, if any
    pub fn tag(&self) -> Option<&Tag> {
        self.tag.as_ref()
    }

    /// Process and host info
    pub fn host(&self) -> &HostInfo {
        &self.host
    }

    /// Key new documents are registered under
    pub fn index_key(&self) -> IndexKey {
        IndexKey::new(self.file.clone(), self.tag.clone())
    }

    /// Metadata to stamp onto a document inserted under this context
    pub fn stamp(&self) -> StampedMetadata {
        StampedMetadata {
            pid: self.host.pid.to_string(),
            hostname: self.host.hostname.clone(),
            filename: self.file.as_str().to_string(),
            tag: self
                .tag
                .as_ref()
                .map(|t| t.as_str().to_string())
                .unwrap_or_default(),
        }
    }
}
