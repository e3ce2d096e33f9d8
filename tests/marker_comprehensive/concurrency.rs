//! Concurrency Tests
//!
//! Many threads inserting and cleaning up through one marker.

use crate::*;
use std::sync::Barrier;
use std::thread;
use testmark::{IndexKey, Tag, TestContext, TestFile};

/// Test parallel inserts into separate files through explicit contexts
#[test]
fn test_parallel_inserts_across_files() {
    let (store, marker) = create_marker();
    let marker = Arc::new(marker);
    let num_threads = 8;
    let per_thread = 50;
    let barrier = Arc::new(Barrier::new(num_threads));

    let handles: Vec<_> = (0..num_threads)
        .map(|t| {
            let marker = Arc::clone(&marker);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let ctx = TestContext::new(TestFile::new(format!("file_{t}.rs")).unwrap());
                barrier.wait();
                (0..per_thread)
                    .map(|i| marker.insert_in(&ctx, test_document(i)).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let results: Vec<Vec<DocumentId>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(store.len(), num_threads * per_thread);
    for (t, ids) in results.iter().enumerate() {
        let key = IndexKey::file_wide(TestFile::new(format!("file_{t}.rs")).unwrap());
        assert_eq!(&marker.index().find(&key), ids);
    }
}

/// Test parallel inserts into one file under different tags
#[test]
fn test_parallel_inserts_across_tags() {
    let (store, marker) = create_marker();
    let marker = Arc::new(marker);
    let base = TestContext::new(TestFile::new("shared.rs").unwrap());
    let num_threads = 4;

    let handles: Vec<_> = (0..num_threads)
        .map(|t| {
            let marker = Arc::clone(&marker);
            let ctx = base.with_tag(Tag::new(format!("tag_{t}")).unwrap());
            thread::spawn(move || {
                for i in 0..25 {
                    marker.insert_in(&ctx, test_document(i)).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(marker.index().len(), 100);
    assert_eq!(
        marker
            .remove_tagged_in(&base, &Tag::new("tag_0").unwrap())
            .unwrap(),
        25
    );
    assert_eq!(marker.remove_all_in(&base).unwrap(), 75);
    assert!(store.is_empty());
}

/// Test cleanups racing inserts on the same file
///
/// Every cleanup must succeed, and a final cleanup must leave nothing
/// behind in either the store or the index.
#[test]
fn test_cleanup_races_inserts() {
    let (store, marker) = create_marker();
    let marker = Arc::new(marker);
    let ctx = TestContext::new(TestFile::new("racy.rs").unwrap());
    let writers = 4;
    let barrier = Arc::new(Barrier::new(writers + 1));

    let mut handles: Vec<_> = (0..writers)
        .map(|_| {
            let marker = Arc::clone(&marker);
            let ctx = ctx.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..100 {
                    marker.insert_in(&ctx, test_document(i)).unwrap();
                }
                0
            })
        })
        .collect();

    {
        let marker = Arc::clone(&marker);
        let ctx = ctx.clone();
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            let mut removed = 0;
            for _ in 0..20 {
                removed += marker.remove_all_in(&ctx).unwrap();
                thread::yield_now();
            }
            removed
        }));
    }

    let removed: u64 = handles.into_iter().map(|h| h.join().unwrap()).sum();
    let remaining = marker.remove_all_in(&ctx).unwrap();

    assert_eq!(removed + remaining, (writers * 100) as u64);
    assert!(store.is_empty());
    assert!(marker.index().is_empty());
}

/// Test that the session file can be shared by many inserting threads
#[test]
fn test_session_shared_across_threads() {
    let (store, marker) = create_marker_for("session.rs");
    let marker = Arc::new(marker);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let marker = Arc::clone(&marker);
            thread::spawn(move || insert_documents(&marker, 10))
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(store.stamped_by("__test", "session.rs").len(), 40);
    assert_eq!(marker.remove_all_test_documents().unwrap(), 40);
}
