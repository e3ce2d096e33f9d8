//! Basic Operation Tests
//!
//! Untagged inserts and file-wide cleanup:
//! - Stamped metadata shape and values
//! - Insert registers ids in order
//! - remove_all_test_documents deletes exactly the tracked documents

use crate::*;
use testmark::{HostInfo, StampedMetadata, TestContext, TestFile};

/// Test the `__test` sub-object written on an untagged insert
#[test]
fn test_insert_stamps_metadata() {
    let (store, marker) = create_marker_for(file!());

    let id = marker.insert(json!({ "foo": "bar", "bar": "baz" })).unwrap();
    let doc = store.get(&id).unwrap();

    assert_eq!(doc["foo"], "bar");
    assert_eq!(doc["bar"], "baz");
    assert_eq!(doc["__test"]["filename"], file!());
    assert_eq!(doc["__test"]["pid"], std::process::id().to_string());
    assert_eq!(doc["__test"]["hostname"], HostInfo::current().hostname);
    assert_eq!(doc["__test"]["tag"], "");

    assert_eq!(marker.remove_all_test_documents().unwrap(), 1);
}

/// Test the stamp for file "suite.js" with tag "alpha"
#[test]
fn test_insert_stamps_file_and_tag() {
    let (store, marker) = create_marker_for("suite.js");
    marker.set_test_tag("alpha").unwrap();

    let id = marker.insert(test_document(1)).unwrap();
    let stamp = StampedMetadata::read_from(&store.get(&id).unwrap(), "__test")
        .unwrap()
        .unwrap();

    let host = HostInfo::current();
    assert_eq!(
        stamp,
        StampedMetadata {
            pid: host.pid.to_string(),
            hostname: host.hostname.clone(),
            filename: "suite.js".to_string(),
            tag: "alpha".to_string(),
        }
    );
}

/// Test that several documents are all removed
#[test]
fn test_remove_multiple_documents() {
    let (store, marker) = create_marker_for(file!());

    let ids = insert_documents(&marker, 5);
    assert_eq!(store.count(&ids), 5);

    assert_eq!(marker.remove_all_test_documents().unwrap(), 5);
    assert_eq!(store.count(&ids), 0);
    assert!(marker.index().is_empty());
}

/// Test that the index lists ids in insertion order and never twice
#[test]
fn test_index_tracks_ids_in_order() {
    let (_, marker) = create_marker_for("order.rs");

    let ids = insert_documents(&marker, 20);
    let tracked = marker.index().find(&"order.rs".parse().unwrap());

    assert_eq!(tracked, ids);
    let unique: std::collections::HashSet<_> = tracked.iter().collect();
    assert_eq!(unique.len(), tracked.len());
}

/// Test that documents not created through the marker are never touched
#[test]
fn test_foreign_documents_untouched() {
    let (store, marker) = create_marker_for(file!());

    let foreign = store.insert(json!({ "seeded": true })).unwrap();
    insert_documents(&marker, 3);

    assert_eq!(marker.remove_all_test_documents().unwrap(), 3);
    assert!(store.contains(&foreign));
    assert_eq!(store.len(), 1);
}

/// Test inserting through an explicit context without any session state
#[test]
fn test_explicit_context_insert() {
    let (store, marker) = create_marker();
    let ctx = TestContext::new(TestFile::new("explicit.rs").unwrap());

    let id = marker.insert_in(&ctx, test_document(0)).unwrap();
    assert_eq!(store.get(&id).unwrap()["__test"]["filename"], "explicit.rs");

    // Session still has no file
    assert!(matches!(marker.context(), Err(Error::MissingTestFile)));

    assert_eq!(marker.remove_all_in(&ctx).unwrap(), 1);
    assert!(store.is_empty());
}

/// Test auditing leftovers by stamp
#[test]
fn test_audit_by_stamp() {
    let (store, marker) = create_marker_for("audited.rs");
    let mut ids = insert_documents(&marker, 3);
    ids.sort();

    assert_eq!(store.stamped_by("__test", "audited.rs"), ids);
}
