//! Insert-time hooks.
//!
//! The host calls these around its own insert, in this order:
//!
//! ```text
//! before_insert(ctx, doc)   stamp provenance onto the document
//! store.insert(doc) -> id   persist (host or DocumentStore)
//! after_insert(ctx, id)     register id under ctx's index key
//! ```
//!
//! `after_insert` must only run when the insert succeeded; an id that never
//! reached storage would make the next cleanup fail its count check.

use crate::error::Result;
use testmark_core::{DocumentId, MarkerOptions, StampedMetadata, TestContext};
use testmark_index::IdentifierIndex;
use testmark_storage::Document;

/// Stamp `doc` with the metadata of `ctx`
///
/// Writes the metadata under `options.field_name`, replacing any earlier
/// stamp, and returns what was written. Fails with
/// [`Error::InvalidDocument`](crate::Error::InvalidDocument) if `doc` is not
/// a JSON object; nothing reaches storage in that case.
pub fn before_insert(
    ctx: &TestContext,
    doc: &mut Document,
    options: &MarkerOptions,
) -> Result<StampedMetadata> {
    let stamp = ctx.stamp();
    stamp.write_to(doc, &options.field_name)?;
    Ok(stamp)
}

/// Register a freshly inserted document under `ctx`'s key
///
/// The key is the test file when `ctx` is untagged, `file!tag` otherwise.
pub fn after_insert(index: &IdentifierIndex, ctx: &TestContext, id: DocumentId) {
    index.add(&ctx.index_key(), id);
}
