//! Lifecycle E2E tests for the shared CPE index.
//!
//! Exercises the reference-counted open/close state machine: build-once
//! semantics, teardown on last close, and tolerance for unbalanced closes.

use pretty_assertions::assert_eq;

use cpe_search::{CpeMemoryIndex, NOT_READY};
use cpe_types::MemoryPairSource;
use e2e_tests::{nvd_fixture, FIXTURE_COMPLETE_PAIRS};

#[test]
fn test_num_docs_counts_only_complete_pairs() {
    let index = CpeMemoryIndex::new();

    // The fixture holds one extra pair with a missing vendor
    index.open(&nvd_fixture()).unwrap();
    assert_eq!(index.num_docs(), FIXTURE_COMPLETE_PAIRS);

    index.close();
}

#[test]
fn test_double_open_does_not_rebuild() {
    let index = CpeMemoryIndex::new();
    index.open(&nvd_fixture()).unwrap();

    let first_hits = index.search("product:strut", 10).unwrap();
    assert_eq!(first_hits.len(), 1);

    // Second open with a completely different source: corpus and document
    // handles stay those of the first build.
    let other = MemoryPairSource::from_pairs([("gnu", "bash")]);
    index.open(&other).unwrap();

    assert_eq!(index.num_docs(), FIXTURE_COMPLETE_PAIRS);
    let second_hits = index.search("product:strut", 10).unwrap();
    assert_eq!(second_hits.len(), 1);
    assert_eq!(second_hits[0].address, first_hits[0].address);

    index.close();
    index.close();
}

#[test]
fn test_n_opens_n_closes_are_symmetric() {
    let index = CpeMemoryIndex::new();
    let n = 5;

    for _ in 0..n {
        index.open(&nvd_fixture()).unwrap();
    }
    assert!(index.is_open());

    for i in 0..n {
        assert!(index.is_open(), "still open after {} closes", i);
        index.close();
    }

    assert!(!index.is_open());
    assert_eq!(index.num_docs(), NOT_READY);
}

#[test]
fn test_over_close_then_fresh_open() {
    let index = CpeMemoryIndex::new();

    index.open(&nvd_fixture()).unwrap();
    index.close();
    // Extra closes must neither panic nor push the counter negative
    index.close();
    index.close();
    assert!(!index.is_open());

    // The next open behaves as a fresh first open, including a rebuild
    let small = MemoryPairSource::from_pairs([("gnu", "bash"), ("gnu", "coreutils")]);
    index.open(&small).unwrap();
    assert_eq!(index.num_docs(), 2);
    index.close();
}

#[test]
fn test_rebuild_picks_up_new_snapshot() {
    let index = CpeMemoryIndex::new();

    index.open(&nvd_fixture()).unwrap();
    assert_eq!(index.num_docs(), FIXTURE_COMPLETE_PAIRS);
    index.close();

    // Cycling through zero is the documented way to pick up source changes
    let updated = nvd_fixture().with_pair(cpe_types::VendorProductPair::complete(
        "apache",
        "log4j",
    ));
    index.open(&updated).unwrap();
    assert_eq!(index.num_docs(), FIXTURE_COMPLETE_PAIRS + 1);
    index.close();
}

#[test]
fn test_shared_handle_across_threads() {
    let index = CpeMemoryIndex::new();
    index.open(&nvd_fixture()).unwrap();

    let mut handles = Vec::new();
    for _ in 0..4 {
        let shared = index.clone();
        handles.push(std::thread::spawn(move || {
            shared.open(&MemoryPairSource::default()).unwrap();
            let hits = shared.search("vendor:apache", 10).unwrap();
            assert_eq!(hits.len(), 2);
            shared.close();
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    // The original open is still outstanding
    assert!(index.is_open());
    assert_eq!(index.num_docs(), FIXTURE_COMPLETE_PAIRS);
    index.close();
    assert!(!index.is_open());
}
