use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use collide::{
    CollisionMask, CollisionPredicate, ParallelSearcher, SearchConfig, SearchError,
    SequentialSearcher, Sha256Digest,
};

mod common;
use common::{CountingDigest, PanickingDigest, PeriodicDigest};

fn config(bits: u32, window: u64, workers: usize) -> SearchConfig {
    SearchConfig {
        collision_bits: bits,
        window_size: window,
        workers,
    }
}

#[test]
fn agrees_with_the_sequential_baseline_under_a_stub() {
    // Matches at 37, 101, 165, 229 inside the first window; which one wins
    // depends on completion order, but any winner must verify and must come
    // from the window of first occurrence.
    let mask = CollisionMask::new(4).unwrap();
    let sequential_predicate =
        CollisionPredicate::new(b"TEST", mask, PeriodicDigest { period: 64, hit: 37 }).unwrap();
    let baseline = SequentialSearcher::new(&sequential_predicate).search();
    assert_eq!(baseline.candidate, 37);

    let predicate =
        CollisionPredicate::new(b"TEST", mask, PeriodicDigest { period: 64, hit: 37 }).unwrap();
    let found = ParallelSearcher::new(predicate, config(4, 256, 4))
        .search()
        .unwrap();
    assert_eq!(found.candidate % 64, 37);
    assert!(found.candidate < 256);
    assert!(sequential_predicate.test(found.candidate));
}

#[test]
fn advances_windows_until_the_match() {
    // Sole match at candidate 2500, three windows in.
    let mask = CollisionMask::new(4).unwrap();
    let digest = PeriodicDigest {
        period: 1_000_000,
        hit: 2_500,
    };
    let predicate = CollisionPredicate::new(b"TEST", mask, digest).unwrap();
    let found = ParallelSearcher::new(predicate, config(4, 1_000, 4))
        .search()
        .unwrap();
    assert_eq!(found.candidate, 2_500);
    assert_eq!(found.message, "TEST:2500");
}

#[test]
fn finds_a_real_sha256_collision() {
    let mask = CollisionMask::new(10).unwrap();
    let predicate = CollisionPredicate::new(b"TEST", mask, Sha256Digest).unwrap();
    let searcher = ParallelSearcher::new(predicate, config(10, 2_048, 4));
    let found = searcher.search().unwrap();

    let verify = CollisionPredicate::new(b"TEST", mask, Sha256Digest).unwrap();
    assert!(verify.test(found.candidate));
    assert_eq!(found.message, format!("TEST:{}", found.candidate));
}

#[test]
fn pool_is_quiescent_after_return() {
    let calls = Arc::new(AtomicU64::new(0));
    let digest = CountingDigest {
        calls: Arc::clone(&calls),
    };
    let mask = CollisionMask::new(16).unwrap();
    let predicate = CollisionPredicate::new(b"TEST", mask, digest).unwrap();
    let found = ParallelSearcher::new(predicate, config(16, 1_000, 4))
        .search()
        .unwrap();
    assert!(found.message.starts_with("TEST:"));

    // All workers are joined before search() returns, so the digest counter
    // must not move afterwards.
    let after_return = calls.load(Ordering::Relaxed);
    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(calls.load(Ordering::Relaxed), after_return);
}

#[test]
fn worker_death_fails_the_whole_search() {
    let mask = CollisionMask::new(4).unwrap();
    let predicate = CollisionPredicate::new(b"TEST", mask, PanickingDigest { poison: 10 }).unwrap();
    let err = ParallelSearcher::new(predicate, config(4, 1_000, 2))
        .search()
        .unwrap_err();
    assert!(matches!(err, SearchError::Worker(_)));
}

#[test]
fn searcher_is_reusable_across_runs() {
    // The pool is scoped to each call, so back-to-back searches both work.
    let mask = CollisionMask::new(4).unwrap();
    let predicate =
        CollisionPredicate::new(b"TEST", mask, PeriodicDigest { period: 16, hit: 3 }).unwrap();
    let searcher = ParallelSearcher::new(predicate, config(4, 64, 2));
    let first = searcher.search().unwrap();
    let second = searcher.search().unwrap();
    assert_eq!(first.candidate % 16, 3);
    assert_eq!(second.candidate % 16, 3);
}

#[test]
fn rejects_invalid_configuration() {
    let mask = CollisionMask::new(4).unwrap();
    let predicate = CollisionPredicate::new(b"TEST", mask, Sha256Digest).unwrap();
    let searcher = ParallelSearcher::new(predicate, config(4, 1_000, 0));
    assert!(matches!(
        searcher.search().unwrap_err(),
        SearchError::Config(_)
    ));
}
