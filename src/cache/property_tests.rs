//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the manager's contract over arbitrary payloads,
//! categories and points in simulated time.

use std::collections::BTreeSet;

use proptest::prelude::*;
use serde_json::{json, Value};

use crate::cache::{CacheCategory, CacheManager, CategoryStatus, CategoryTable, Expiry};
use crate::clock::{duration_to_ms, ManualClock};
use crate::storage::MemoryStore;

// == Helpers ==
fn manager() -> (CacheManager, ManualClock) {
    let clock = ManualClock::new(0);
    let manager = CacheManager::new(MemoryStore::new(), clock.clone(), CategoryTable::defaults());
    (manager, clock)
}

fn ttl_ms(category: CacheCategory) -> i64 {
    duration_to_ms(category.ttl())
}

// == Strategies ==
fn category_strategy() -> impl Strategy<Value = CacheCategory> {
    prop::sample::select(CacheCategory::ALL.to_vec())
}

/// Record lists shaped like the portal's tables
fn payload_strategy() -> impl Strategy<Value = Value> {
    prop::collection::vec((any::<u32>(), "[a-zA-Z0-9 ]{0,32}", any::<bool>()), 0..20).prop_map(
        |rows| {
            Value::Array(
                rows.into_iter()
                    .map(|(id, title, active)| json!({"id": id, "title": title, "active": active}))
                    .collect(),
            )
        },
    )
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Set { category: CacheCategory, payload: Value },
    Get { category: CacheCategory },
    Remove { category: CacheCategory },
    Advance { ms: u32 },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (category_strategy(), payload_strategy())
            .prop_map(|(category, payload)| CacheOp::Set { category, payload }),
        category_strategy().prop_map(|category| CacheOp::Get { category }),
        category_strategy().prop_map(|category| CacheOp::Remove { category }),
        (0u32..4_000_000).prop_map(|ms| CacheOp::Advance { ms }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Storing a payload and reading it back before expiry returns it unchanged.
    #[test]
    fn prop_roundtrip_before_expiry(
        category in category_strategy(),
        payload in payload_strategy(),
        fraction in 0.0f64..=1.0
    ) {
        let (mut cache, clock) = manager();
        prop_assert!(cache.set(category.name(), &payload));

        clock.set((ttl_ms(category) as f64 * fraction) as i64);
        prop_assert_eq!(cache.get::<Value>(category.name(), false), Some(payload));
    }

    // Past the TTL a read misses and the storage key is gone.
    #[test]
    fn prop_expired_read_evicts(
        category in category_strategy(),
        payload in payload_strategy(),
        overshoot in 1i64..10_000_000
    ) {
        let (mut cache, clock) = manager();
        cache.set(category.name(), &payload);

        clock.set(ttl_ms(category) + overshoot);
        prop_assert!(cache.get::<Value>(category.name(), false).is_none());
        prop_assert!(cache.storage().get_item(category.storage_key()).unwrap().is_none());
    }

    // Ignoring expiry always returns the payload and never evicts.
    #[test]
    fn prop_ignore_expiry_keeps_entry(
        category in category_strategy(),
        payload in payload_strategy(),
        later in 0i64..100_000_000
    ) {
        let (mut cache, clock) = manager();
        cache.set(category.name(), &payload);

        clock.set(later);
        prop_assert_eq!(cache.get::<Value>(category.name(), true), Some(payload));
        prop_assert!(cache.storage().get_item(category.storage_key()).unwrap().is_some());
    }

    // After a remove, a subsequent read misses.
    #[test]
    fn prop_remove_removes_entry(category in category_strategy(), payload in payload_strategy()) {
        let (mut cache, _clock) = manager();
        cache.set(category.name(), &payload);

        cache.remove(category.name());
        prop_assert!(cache.get::<Value>(category.name(), true).is_none());
    }

    // Last write wins.
    #[test]
    fn prop_overwrite_semantics(
        category in category_strategy(),
        first in payload_strategy(),
        second in payload_strategy()
    ) {
        let (mut cache, _clock) = manager();
        cache.set(category.name(), &first);
        cache.set(category.name(), &second);

        prop_assert_eq!(cache.get::<Value>(category.name(), false), Some(second));
        prop_assert_eq!(cache.stats().len(), 1);
    }

    // Stats reports exactly the categories holding an entry, and the
    // remaining time never increases as the clock moves forward.
    #[test]
    fn prop_stats_track_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let (mut cache, clock) = manager();
        let mut now: i64 = 0;
        let mut present: BTreeSet<String> = BTreeSet::new();

        for op in ops {
            match op {
                CacheOp::Set { category, payload } => {
                    prop_assert!(cache.set(category.name(), &payload));
                    present.insert(category.name().to_string());
                }
                CacheOp::Get { category } => {
                    let expected_hit = present.contains(category.name());
                    let hit = cache.get::<Value>(category.name(), false).is_some();
                    if expected_hit && !hit {
                        present.remove(category.name());
                    }
                    prop_assert!(!hit || expected_hit);
                }
                CacheOp::Remove { category } => {
                    cache.remove(category.name());
                    present.remove(category.name());
                }
                CacheOp::Advance { ms } => {
                    let before = cache.stats();
                    now += i64::from(ms);
                    clock.set(now);
                    for (name, status) in cache.stats() {
                        if let (
                            Some(CategoryStatus::Present { expires_in_seconds: Expiry::InSeconds(old), .. }),
                            CategoryStatus::Present { expires_in_seconds: Expiry::InSeconds(new), .. },
                        ) = (before.get(&name), status) {
                            prop_assert!(new <= *old);
                        }
                    }
                }
            }

            let reported: BTreeSet<String> = cache.stats().into_keys().collect();
            prop_assert_eq!(&reported, &present);
        }
    }
}

// == Deterministic Checks ==
#[test]
fn test_clear_after_populating_every_category() {
    let (mut cache, _clock) = manager();
    for category in CacheCategory::ALL {
        cache.set(category.name(), &json!([{"id": 1}]));
    }
    assert_eq!(cache.stats().len(), CacheCategory::ALL.len());

    cache.clear();

    assert!(cache.stats().is_empty());
    for category in CacheCategory::ALL {
        assert!(cache.get::<Value>(category.name(), true).is_none());
    }
}
