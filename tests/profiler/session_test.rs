/*!
 * Session Tests
 * Hook dispatch, counters, and session lifecycle
 */

use super::common::FakeHeap;
use heapscope::{Category, Profiler, RawCall, SessionConfig, TrackError};
use pretty_assertions::assert_eq;

fn started(base: usize) -> Profiler<FakeHeap> {
    let mut profiler = Profiler::new(FakeHeap::new());
    profiler
        .start(SessionConfig::new(base), None)
        .expect("fresh profiler starts");
    profiler
}

#[test]
fn allocate_free_reallocate_scenario() {
    let mut profiler = started(0x1000);

    let a = profiler
        .handle(RawCall::allocate(Category::String, 100))
        .unwrap()
        .expect("address");
    {
        let stats = profiler.stats().unwrap();
        assert_eq!(stats.live_bytes, 100);
        assert_eq!(stats.count_for(Category::String), 1);
    }

    let b = profiler
        .handle(RawCall::allocate(Category::Table, 50))
        .unwrap()
        .expect("address");
    {
        let stats = profiler.stats().unwrap();
        assert_eq!(stats.live_bytes, 150);
        assert_eq!(stats.peak_bytes, 150);
    }

    // Shrink A; the fake heap moves the region to a new address.
    let c = profiler
        .handle(RawCall::reallocate(a, 100, 30))
        .unwrap()
        .expect("address");
    assert_ne!(a, c);
    {
        let stats = profiler.stats().unwrap();
        // 150 + (30 - 100)
        assert_eq!(stats.live_bytes, 80);
        assert_eq!(stats.peak_bytes, 150);
        // Reallocation never moves category counts.
        assert_eq!(stats.count_for(Category::String), 1);
    }

    profiler.handle(RawCall::free(b, 50)).unwrap();
    assert_eq!(profiler.stats().unwrap().live_bytes, 30);
    assert_eq!(profiler.live_count().unwrap(), 1);

    let report = profiler.stop().unwrap();
    assert_eq!(report.stats.alloc_count, 2);
    assert_eq!(report.stats.alloc_bytes, 150);
    assert_eq!(report.stats.realloc_count, 1);
    assert_eq!(report.stats.realloc_delta_bytes, -70);
    assert_eq!(report.stats.free_count, 1);
    assert_eq!(report.stats.free_bytes, 50);
    assert_eq!(report.stats.peak_bytes, 150);
    // No view: a budget suggestion accompanies the report.
    assert!(report.suggested_budget_mb.is_some());
}

#[test]
fn free_of_untracked_address_releases_but_counts_nothing() {
    let mut profiler = started(0);
    profiler
        .handle(RawCall::allocate(Category::Other, 8))
        .unwrap();

    let result = profiler.handle(RawCall::free(0xdead_beef, 123)).unwrap();
    assert_eq!(result, None);

    let stats = profiler.stats().unwrap();
    assert_eq!(stats.free_count, 0);
    assert_eq!(stats.free_bytes, 0);
    assert_eq!(profiler.live_count().unwrap(), 1);
}

#[test]
fn free_of_null_is_a_no_op() {
    let mut profiler = started(0);
    let raw = RawCall {
        ptr: None,
        old_size: 0,
        category: Category::Other,
        new_size: 0,
    };
    assert_eq!(profiler.handle(raw).unwrap(), None);
    assert_eq!(profiler.stats().unwrap().free_count, 0);
}

#[test]
fn reallocate_of_untracked_address_arrives_fresh() {
    let mut profiler = started(0);

    profiler
        .handle(RawCall::reallocate(0xdead_beef, 64, 200))
        .unwrap()
        .expect("address");

    let stats = profiler.stats().unwrap();
    assert_eq!(stats.realloc_count, 1);
    // Nothing was tracked on the old side, so the whole new size arrives.
    assert_eq!(stats.realloc_delta_bytes, 200);
    assert_eq!(stats.live_bytes, 200);
    assert_eq!(stats.alloc_count, 0);
    assert_eq!(profiler.live_count().unwrap(), 1);
}

#[test]
fn failed_allocation_touches_nothing() {
    let sys = FakeHeap::new();
    let fail = sys.failure_switch();
    let mut profiler = Profiler::new(sys);
    profiler.start(SessionConfig::new(0), None).unwrap();
    fail.set(true);

    let err = profiler
        .handle(RawCall::allocate(Category::Table, 4096))
        .unwrap_err();
    assert_eq!(err, TrackError::AllocationFailed { requested: 4096 });

    let stats = profiler.stats().unwrap();
    assert_eq!(stats.alloc_count, 0);
    assert_eq!(stats.live_bytes, 0);
    assert_eq!(profiler.live_count().unwrap(), 0);
}

#[test]
fn failed_reallocation_keeps_the_old_block_tracked() {
    let sys = FakeHeap::new();
    let fail = sys.failure_switch();
    let mut profiler = Profiler::new(sys);
    profiler.start(SessionConfig::new(0), None).unwrap();

    let a = profiler
        .handle(RawCall::allocate(Category::String, 100))
        .unwrap()
        .expect("address");

    // Next underlying call refuses; the realloc must leave all state alone.
    // (The fake heap also leaves the region intact, as realloc does.)
    fail.set(true);
    let err = profiler.handle(RawCall::reallocate(a, 100, 500)).unwrap_err();
    assert_eq!(err, TrackError::AllocationFailed { requested: 500 });

    let stats = profiler.stats().unwrap();
    assert_eq!(stats.realloc_count, 0);
    assert_eq!(stats.live_bytes, 100);
    assert_eq!(profiler.live_count().unwrap(), 1);

    // The old address still resolves on a later, successful operation.
    profiler
        .handle(RawCall::reallocate(a, 100, 30))
        .unwrap()
        .expect("address");
    assert_eq!(profiler.stats().unwrap().live_bytes, 30);
}

#[test]
fn session_misuse_fails_loudly() {
    let mut profiler = Profiler::new(FakeHeap::new());

    assert_eq!(profiler.stop().unwrap_err(), TrackError::NotActive);
    assert_eq!(
        profiler
            .handle(RawCall::allocate(Category::Other, 1))
            .unwrap_err(),
        TrackError::NotActive
    );

    profiler.start(SessionConfig::new(0), None).unwrap();
    assert_eq!(
        profiler.start(SessionConfig::new(0), None).unwrap_err(),
        TrackError::AlreadyActive
    );

    // The running session survived the failed start.
    profiler
        .handle(RawCall::allocate(Category::Other, 1))
        .unwrap();
    assert_eq!(profiler.stats().unwrap().alloc_count, 1);
}

#[test]
fn stop_resets_for_a_clean_restart() {
    let mut profiler = started(0);
    profiler
        .handle(RawCall::allocate(Category::Thread, 64))
        .unwrap();
    profiler.stop().unwrap();
    assert!(!profiler.is_active());

    profiler.start(SessionConfig::new(0), None).unwrap();
    let stats = profiler.stats().unwrap();
    assert_eq!(stats.alloc_count, 0);
    assert_eq!(stats.live_bytes, 0);
    assert_eq!(profiler.live_count().unwrap(), 0);
}

#[test]
fn in_place_reallocation_still_recreates_identity() {
    let mut sys = FakeHeap::new();
    sys.realloc_in_place = true;
    let mut profiler = Profiler::new(sys);
    profiler.start(SessionConfig::new(0), None).unwrap();

    let a = profiler
        .handle(RawCall::allocate(Category::Table, 40))
        .unwrap()
        .expect("address");
    let b = profiler
        .handle(RawCall::reallocate(a, 40, 120))
        .unwrap()
        .expect("address");
    assert_eq!(a, b);

    let stats = profiler.stats().unwrap();
    assert_eq!(stats.live_bytes, 120);
    assert_eq!(stats.realloc_delta_bytes, 80);
    assert_eq!(profiler.live_count().unwrap(), 1);
}
