//! Cache Container Tests.
//!
//! Verifies `Cache` construction from `CacheParams`, routing of addresses to
//! sets, and that sets never influence one another.

use csim_core::cache::{Cache, ProbeOutcome};
use csim_core::common::{ConfigError, SimError};
use csim_core::CacheParams;

use crate::common::params;

#[test]
fn builds_two_to_the_s_sets_of_e_lines() {
    let cache = Cache::new(&params(3, 4, 2)).unwrap();
    assert_eq!(cache.num_sets(), 8);
    assert!(cache.sets().all(|set| set.ways() == 4 && set.occupancy() == 0));
    assert!(cache.set(7).is_some());
    assert!(cache.set(8).is_none());
}

#[test]
fn rejects_invalid_geometry() {
    let bad = CacheParams { s: 2, e: 0, b: 2 };
    let err = Cache::new(&bad).unwrap_err();
    assert!(matches!(err, SimError::Config(ConfigError::ZeroAssociativity)));
}

#[test]
fn oversized_associativity_is_an_allocation_error() {
    let huge = params(0, usize::MAX / 2, 0);
    match Cache::new(&huge) {
        Err(SimError::Allocation(err)) => {
            assert_eq!(err.sets, 1);
            assert_eq!(err.ways, usize::MAX / 2);
        }
        other => panic!("expected allocation failure, got {other:?}"),
    }
}

#[test]
#[cfg(target_pointer_width = "64")]
fn oversized_set_count_is_an_allocation_error() {
    let err = Cache::new(&params(60, 1, 0)).unwrap_err();
    assert!(matches!(err, SimError::Allocation(_)));
}

#[test]
fn same_block_different_offset_hits() {
    let mut cache = Cache::new(&params(2, 1, 4)).unwrap();
    assert!(cache.probe(0x40).is_miss());
    assert!(cache.probe(0x4f).is_hit());
    assert!(cache.probe(0x50).is_miss());
}

#[test]
fn addresses_route_to_their_set() {
    let mut cache = Cache::new(&params(2, 1, 4)).unwrap();
    // set = (addr >> 4) & 3
    let _ = cache.probe(0x00);
    let _ = cache.probe(0x10);
    let _ = cache.probe(0x20);
    let _ = cache.probe(0x30);
    for index in 0..4 {
        assert_eq!(cache.set(index).unwrap().occupancy(), 1);
    }
}

#[test]
fn sets_are_isolated() {
    let mut cache = Cache::new(&params(1, 1, 0)).unwrap();
    // Even addresses map to set 0, odd to set 1.
    let _ = cache.probe(0x0);
    let _ = cache.probe(0x1);
    assert_eq!(
        cache.probe(0x3),
        ProbeOutcome::Evict { way: 0, victim: 0 }
    );
    // Set 0 was untouched by the conflict in set 1.
    assert!(cache.probe(0x0).is_hit());
}

#[test]
fn contains_reports_residency_without_probing() {
    let mut cache = Cache::new(&params(1, 2, 0)).unwrap();
    assert!(!cache.contains(0x4));
    let _ = cache.probe(0x4);
    assert!(cache.contains(0x4));
    assert!(!cache.contains(0x5));
    assert!(!cache.contains(0x6));
}

#[test]
fn params_are_retained() {
    let p = params(5, 2, 6);
    let cache = Cache::new(&p).unwrap();
    assert_eq!(cache.params(), &p);
    assert_eq!(cache.decoder().set_index(0x7c0), 0x1f);
}
