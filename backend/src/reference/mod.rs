//! Reference data generation
//!
//! Produces the deterministic pool of depot batches every scenario starts
//! from. Batches are staggered so that a higher index means an older
//! manufacture date but a strictly later expiry date.
//!
//! # Draw order
//!
//! Exactly one `range(80, 201)` draw per batch, in index order. Nothing else
//! is drawn, so the generator leaves the RNG positioned for forecast noise.

use chrono::{DateTime, Duration, Utc};

use crate::core::time::midnight_of;
use crate::models::Batch;
use crate::rng::RngManager;

/// Batches in every generated pool
pub const BATCH_COUNT: usize = 10;

/// Inclusive bounds of a batch's initial quantity
pub const MIN_BATCH_UNITS: i64 = 80;
pub const MAX_BATCH_UNITS: i64 = 200;

/// Batch `i` is manufactured `MANUFACTURE_OFFSET_DAYS + i * MANUFACTURE_STEP_DAYS`
/// days before the run-start date
const MANUFACTURE_OFFSET_DAYS: i64 = 60;
const MANUFACTURE_STEP_DAYS: i64 = 7;

/// Batch `i` expires `SHELF_LIFE_DAYS + i * SHELF_LIFE_STEP_DAYS` days after manufacture
const SHELF_LIFE_DAYS: i64 = 180;
const SHELF_LIFE_STEP_DAYS: i64 = 10;

const LAST_INDEX: i64 = BATCH_COUNT as i64 - 1;

/// Oldest manufacture date, in days before the run-start date
pub const LOOKBACK_DAYS: i64 = MANUFACTURE_OFFSET_DAYS + LAST_INDEX * MANUFACTURE_STEP_DAYS;

/// Latest expiry date, in days after the run-start date (the last batch
/// expires last)
pub const LOOKAHEAD_DAYS: i64 = SHELF_LIFE_DAYS + LAST_INDEX * SHELF_LIFE_STEP_DAYS - LOOKBACK_DAYS;

/// Generate the batch pool, drawing quantities from `rng`
///
/// For batch `i`: manufactured `60 + 7i` days before the run-start date,
/// expiring `180 + 10i` days after manufacture.
pub fn generate_batches(rng: &mut RngManager, run_start: DateTime<Utc>) -> Vec<Batch> {
    let today = midnight_of(run_start);

    (0..BATCH_COUNT as i64)
        .map(|i| {
            let manufacture_date = today - Duration::days(MANUFACTURE_OFFSET_DAYS + i * MANUFACTURE_STEP_DAYS);
            let expiry_date = manufacture_date + Duration::days(SHELF_LIFE_DAYS + i * SHELF_LIFE_STEP_DAYS);
            let units = rng.range(MIN_BATCH_UNITS, MAX_BATCH_UNITS + 1);
            Batch {
                batch_id: format!("BATCH-{:03}", i + 1),
                manufacture_date,
                expiry_date,
                available_units: units as u32,
            }
        })
        .collect()
}

/// Generate the batch pool for a seed with a fresh generator
pub fn generate_batches_for_seed(seed: u64, run_start: DateTime<Utc>) -> Vec<Batch> {
    let mut rng = RngManager::new(seed);
    generate_batches(&mut rng, run_start)
}
