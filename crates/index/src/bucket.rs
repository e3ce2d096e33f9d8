//! Per-file identifier buckets
//!
//! One [`FileBucket`] holds every identifier registered under a single test
//! file: an explicit untagged bucket plus one bucket per tag. Every id gets a
//! per-file sequence number on insertion, so a file-wide lookup can return
//! ids across all buckets in the order they were registered.

use rustc_hash::FxHashMap;
use testmark_core::{DocumentId, Tag};

#[derive(Debug, Clone)]
struct Slot {
    seq: u64,
    id: DocumentId,
}

/// Identifiers registered under one test file
#[derive(Debug, Default)]
pub struct FileBucket {
    untagged: Vec<Slot>,
    tagged: FxHashMap<Tag, Vec<Slot>>,
    next_seq: u64,
}

impl FileBucket {
    /// Append `id` to the bucket for `tag` (`None` = untagged)
    pub fn push(&mut self, tag: Option<Tag>, id: DocumentId) {
        let slot = Slot {
            seq: self.next_seq,
            id,
        };
        self.next_seq += 1;
        match tag {
            Some(tag) => self.tagged.entry(tag).or_default().push(slot),
            None => self.untagged.push(slot),
        }
    }

    /// Ids under `tag`, or under every bucket when `tag` is `None`
    ///
    /// Results are in registration order.
    pub fn find(&self, tag: Option<&Tag>) -> Vec<DocumentId> {
        match tag {
            Some(tag) => self
                .tagged
                .get(tag)
                .map(|slots| slots.iter().map(|s| s.id.clone()).collect())
                .unwrap_or_default(),
            None => {
                let mut all: Vec<&Slot> = self
                    .untagged
                    .iter()
                    .chain(self.tagged.values().flatten())
                    .collect();
                all.sort_unstable_by_key(|s| s.seq);
                all.into_iter().map(|s| s.id.clone()).collect()
            }
        }
    }

    /// Drop the bucket for `tag`, or every bucket when `tag` is `None`
    ///
    /// Returns the number of ids dropped.
    pub fn remove(&mut self, tag: Option<&Tag>) -> usize {
        match tag {
            Some(tag) => self.tagged.remove(tag).map(|s| s.len()).unwrap_or(0),
            None => {
                let dropped = self.len();
                self.untagged = Vec::new();
                self.tagged.clear();
                dropped
            }
        }
    }

    /// Whether anything is registered under `tag` (`None` = anything at all)
    pub fn contains(&self, tag: Option<&Tag>) -> bool {
        match tag {
            Some(tag) => self.tagged.contains_key(tag),
            None => !self.is_empty(),
        }
    }

    /// Tags with at least one id, plus `None` if the untagged bucket is non-empty
    pub fn tags(&self) -> Vec<Option<Tag>> {
        let mut tags: Vec<Option<Tag>> = self.tagged.keys().cloned().map(Some).collect();
        tags.sort();
        if !self.untagged.is_empty() {
            tags.insert(0, None);
        }
        tags
    }

    /// Total ids across all buckets
    pub fn len(&self) -> usize {
        self.untagged.len() + self.tagged.values().map(Vec::len).sum::<usize>()
    }

    /// Whether no ids are registered
    pub fn is_empty(&self) -> bool {
        self.untagged.is_empty() && self.tagged.is_empty()
    }
}
