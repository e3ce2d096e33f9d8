//! Scoped cleanup of test documents.
//!
//! Both operations run one unit inside the file's critical section:
//!
//! ```text
//! 1. lookup   ids = index.find(key)
//! 2. delete   deleted = store.bulk_delete(ids)      (skipped when ids is empty)
//! 3. verify   deleted == ids.len()
//! 4. purge    index.remove(key)
//! ```
//!
//! If step 2 errors or step 3 fails, step 4 never runs: the index still
//! holds every id, and the whole call can be retried. A partial purge is
//! never committed.
//!
//! A file with nothing ever registered returns 0 without creating an index
//! slot for it.

use crate::error::{Error, Result};
use testmark_core::{IndexKey, Tag, TestContext};
use testmark_index::IdentifierIndex;
use testmark_storage::DocumentStore;

/// Delete the documents created under `ctx`'s file and `tag`
///
/// Exact lookup: sibling tags and the untagged bucket are left alone.
/// Returns the number of documents deleted.
pub fn remove_by_tag<S>(
    index: &IdentifierIndex,
    store: &S,
    ctx: &TestContext,
    tag: &Tag,
) -> Result<u64>
where
    S: DocumentStore + ?Sized,
{
    purge(index, store, IndexKey::tagged(ctx.file().clone(), tag.clone()))
}

/// Delete every document created under `ctx`'s file, tagged or not
///
/// Returns the number of documents deleted.
pub fn remove_by_file<S>(index: &IdentifierIndex, store: &S, ctx: &TestContext) -> Result<u64>
where
    S: DocumentStore + ?Sized,
{
    purge(index, store, IndexKey::file_wide(ctx.file().clone()))
}

fn purge<S>(index: &IdentifierIndex, store: &S, key: IndexKey) -> Result<u64>
where
    S: DocumentStore + ?Sized,
{
    let outcome = index.transaction_existing(key.file(), |bucket| {
        let ids = bucket.find(key.tag());
        if ids.is_empty() {
            tracing::debug!(key = %key, "nothing to remove");
            return Ok(0);
        }

        let deleted = store.bulk_delete(&ids).map_err(|e| {
            tracing::error!(key = %key, expected = ids.len(), error = %e, "bulk delete failed");
            e
        })?;

        if deleted != ids.len() as u64 {
            tracing::warn!(
                key = %key,
                expected = ids.len(),
                deleted,
                "bulk delete count mismatch, keeping index entry"
            );
            return Err(Error::CountMismatch {
                key: key.to_string(),
                expected: ids.len(),
                deleted,
            });
        }

        bucket.remove(key.tag());
        tracing::info!(key = %key, deleted, "removed test documents");
        Ok(deleted)
    });

    outcome.unwrap_or_else(|| {
        tracing::debug!(key = %key, "nothing registered for file");
        Ok(0)
    })
}
