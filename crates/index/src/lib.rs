//! Identifier index for testmark
//!
//! Tracks which document ids were created under which test file and tag:
//! - IdentifierIndex: file -> tag -> ordered ids, sharded by file
//! - FileBucket: the per-file buckets, exposed inside critical sections

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bucket;
pub mod index;

pub use bucket::FileBucket;
pub use index::IdentifierIndex;
