//! Core identifiers for testmark
//!
//! This module defines the names everything else is keyed by:
//! - [`TestFile`]: the suite that created a document
//! - [`Tag`]: optional secondary grouping inside a test file
//! - [`DocumentId`]: identifier assigned by the document store
//! - [`IndexKey`]: composite `file` / `file!tag` key of the identifier index

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Separator between test file and tag in the textual form of an [`IndexKey`]
pub const KEY_SEPARATOR: char = '!';

/// Name of the test file (suite) that creates documents
///
/// Never empty. Construction from an empty string fails with
/// [`Error::MissingTestFile`].
///
/// # Examples
///
/// ```
/// use testmark_core::types::TestFile;
///
/// let file = TestFile::new("tests/users.rs").unwrap();
/// assert_eq!(file.as_str(), "tests/users.rs");
/// assert!(TestFile::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TestFile(String);

impl TestFile {
    /// Create a test file name, rejecting the empty string
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::MissingTestFile);
        }
        Ok(TestFile(name))
    }

    /// Borrow the name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TestFile {
    type Error = Error;

    fn try_from(name: String) -> Result<Self> {
        TestFile::new(name)
    }
}

impl From<TestFile> for String {
    fn from(file: TestFile) -> Self {
        file.0
    }
}

impl std::fmt::Display for TestFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tag scoping documents inside a test file
///
/// Never empty. The untagged state is modelled as `Option<Tag>::None`,
/// not as an empty tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag(String);

impl Tag {
    /// Create a tag, rejecting the empty string
    pub fn new(tag: impl Into<String>) -> Result<Self> {
        let tag = tag.into();
        if tag.is_empty() {
            return Err(Error::MissingTag);
        }
        Ok(Tag(tag))
    }

    /// Borrow the tag
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Tag {
    type Error = Error;

    fn try_from(tag: String) -> Result<Self> {
        Tag::new(tag)
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.0
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier the document store assigned to an inserted document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Wrap a store-assigned identifier
    pub fn new(id: impl Into<String>) -> Self {
        DocumentId(id.into())
    }

    /// Borrow the identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        DocumentId(id)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        DocumentId(id.to_string())
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key of the identifier index
///
/// A key without a tag addresses the whole test file: the untagged bucket
/// and every tag bucket registered under it. A key with a tag addresses
/// exactly one bucket.
///
/// The textual form is `file` or `file!tag`. Parsing splits on the last
/// separator, so a file name may contain `!` but a tag parsed from text may
/// not; build such keys with [`IndexKey::tagged`].
///
/// # Examples
///
/// ```
/// use testmark_core::types::IndexKey;
///
/// let key: IndexKey = "suite.rs!alpha".parse().unwrap();
/// assert_eq!(key.file().as_str(), "suite.rs");
/// assert_eq!(key.tag().map(|t| t.as_str()), Some("alpha"));
/// assert_eq!(key.to_string(), "suite.rs!alpha");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexKey {
    file: TestFile,
    tag: Option<Tag>,
}

impl IndexKey {
    /// Key covering the whole test file
    pub fn file_wide(file: TestFile) -> Self {
        IndexKey { file, tag: None }
    }

    /// Key for one tag bucket
    pub fn tagged(file: TestFile, tag: Tag) -> Self {
        IndexKey {
            file,
            tag: Some(tag),
        }
    }

    /// Key from a file and an optional tag
    pub fn new(file: TestFile, tag: Option<Tag>) -> Self {
        IndexKey { file, tag }
    }

    /// The test file part
    pub fn file(&self) -> &TestFile {
        &self.file
    }

    /// The tag part, `None` for file-wide keys
    pub fn tag(&self) -> Option<&Tag> {
        self.tag.as_ref()
    }

    /// Whether this key matches every bucket of its file
    pub fn is_file_wide(&self) -> bool {
        self.tag.is_none()
    }
}

impl std::fmt::Display for IndexKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "{}{}{}", self.file, KEY_SEPARATOR, tag),
            None => write!(f, "{}", self.file),
        }
    }
}

impl FromStr for IndexKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.rsplit_once(KEY_SEPARATOR) {
            Some((file, tag)) => Ok(IndexKey::tagged(TestFile::new(file)?, Tag::new(tag)?)),
            None => Ok(IndexKey::file_wide(TestFile::new(s)?)),
        }
    }
}
