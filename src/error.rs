//! Error types for testmark.
//!
//! The workspace shares one error enum, defined in `testmark-core`.
//! Precondition variants (`MissingTestFile`, `MissingTag`,
//! `InvalidDocument`) signal programmer errors and must not be retried;
//! `Storage` and `CountMismatch` leave the index untouched and are safe to
//! retry.

pub use testmark_core::error::{Error, Result};
