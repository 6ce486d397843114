//! Property tests for FIFO-by-expiry allocation

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use trial_supply_sim_core_rs::decisions::allocate_fifo_by_expiry;
use trial_supply_sim_core_rs::Batch;

fn day0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

fn pool(spec: &[(i64, u32)]) -> Vec<Batch> {
    spec.iter()
        .enumerate()
        .map(|(i, &(expiry, units))| Batch {
            batch_id: format!("BATCH-{:03}", i),
            manufacture_date: day0(),
            expiry_date: day0() + Duration::days(expiry),
            available_units: units,
        })
        .collect()
}

fn ids(batches: &[Batch]) -> Vec<String> {
    batches.iter().map(|b| b.batch_id.clone()).collect()
}

#[test]
fn test_exact_fit_single_batch() {
    let mut batches = pool(&[(100, 50), (50, 80)]);
    let all = ids(&batches);

    let allocation = allocate_fifo_by_expiry(&mut batches, &all, 80);
    assert_eq!(allocation.batch_ids, vec!["BATCH-001"]);
    assert_eq!(allocation.shortfall, 0);
    assert_eq!(batches[1].available_units, 0);
    assert_eq!(batches[0].available_units, 50);
}

#[test]
fn test_ineligible_batches_untouched() {
    let mut batches = pool(&[(10, 100), (20, 100)]);

    let allocation = allocate_fifo_by_expiry(&mut batches, &["BATCH-001"], 150);
    assert_eq!(allocation.batch_ids, vec!["BATCH-001"]);
    assert_eq!(allocation.allocated_units, 100);
    assert_eq!(allocation.shortfall, 50);
    assert_eq!(batches[0].available_units, 100);
}

#[test]
fn test_empty_pool_is_full_shortfall() {
    let mut batches: Vec<Batch> = Vec::new();
    let none: [&str; 0] = [];

    let allocation = allocate_fifo_by_expiry(&mut batches, &none, 50);
    assert!(allocation.batch_ids.is_empty());
    assert_eq!(allocation.allocated_units, 0);
    assert_eq!(allocation.constraint_notes(), vec!["Short 50 units; partial allocation"]);
}

#[test]
fn test_equal_expiry_keeps_pool_order() {
    let mut batches = pool(&[(30, 10), (30, 10), (30, 10)]);
    let all = ids(&batches);

    let allocation = allocate_fifo_by_expiry(&mut batches, &all, 15);
    assert_eq!(allocation.batch_ids, vec!["BATCH-000", "BATCH-001"]);
}

proptest! {
    #[test]
    fn prop_allocation_invariants(
        spec in prop::collection::vec((1i64..400, 0u32..300), 0..12),
        quantity in 1u32..2_000,
    ) {
        let mut batches = pool(&spec);
        let all = ids(&batches);
        let stock: u32 = batches.iter().map(|b| b.available_units).sum();

        let allocation = allocate_fifo_by_expiry(&mut batches, &all, quantity);

        // Units are conserved
        let left: u32 = batches.iter().map(|b| b.available_units).sum();
        prop_assert_eq!(stock - left, allocation.allocated_units);
        prop_assert_eq!(allocation.allocated_units + allocation.shortfall, quantity);
        prop_assert_eq!(allocation.allocated_units, quantity.min(stock));

        // Consumption order follows expiry
        let expiries: Vec<_> = allocation
            .batch_ids
            .iter()
            .map(|id| batches.iter().find(|b| &b.batch_id == id).unwrap().expiry_date)
            .collect();
        for pair in expiries.windows(2) {
            prop_assert!(pair[0] <= pair[1]);
        }

        // Every batch but the last touched one is emptied
        if let Some((_, emptied)) = allocation.batch_ids.split_last() {
            for id in emptied {
                let batch = batches.iter().find(|b| &b.batch_id == id).unwrap();
                prop_assert_eq!(batch.available_units, 0);
            }
        }
    }
}
