//! Core types for testmark
//!
//! This crate defines what the rest of the workspace passes around:
//! - [`TestFile`], [`Tag`], [`DocumentId`], [`IndexKey`]: identifiers
//! - [`TestContext`]: immutable snapshot of the active file and tag
//! - [`StampedMetadata`]: provenance written onto each document
//! - [`MarkerOptions`]: configuration
//! - [`Error`]: the single error type

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod context;
pub mod error;
pub mod metadata;
pub mod options;
pub mod types;

pub use context::{HostInfo, TestContext};
pub use error::{Error, Result};
pub use metadata::{StampedMetadata, DEFAULT_FIELD};
pub use options::MarkerOptions;
pub use types::{DocumentId, IndexKey, Tag, TestFile, KEY_SEPARATOR};
