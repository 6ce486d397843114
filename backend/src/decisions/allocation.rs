//! FIFO-by-expiry lot allocation
//!
//! Eligible batches are consumed in ascending expiry order until the request
//! is met. Running out of stock is not an error: the allocation reports the
//! shortfall and carries whatever could be reserved.

use serde::{Deserialize, Serialize};

use crate::models::Batch;

/// Outcome of one allocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Touched batches, in consumption order
    pub batch_ids: Vec<String>,
    pub allocated_units: u32,
    /// Requested units that could not be reserved
    pub shortfall: u32,
}

impl Allocation {
    pub fn is_partial(&self) -> bool {
        self.shortfall > 0
    }

    /// Constraint notes to attach to the response
    pub fn constraint_notes(&self) -> Vec<String> {
        if self.is_partial() {
            vec![shortfall_note(self.shortfall)]
        } else {
            Vec::new()
        }
    }
}

pub fn shortfall_note(shortfall: u32) -> String {
    format!("Short {} units; partial allocation", shortfall)
}

/// Allocate `quantity` units from the batches named in `eligible`
///
/// Batches are ordered by expiry date (ties keep pool order) and consumed
/// greedily; each touched batch's `available_units` is decremented by the
/// amount taken. Batches with nothing left are skipped, not listed.
///
/// # Example
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use trial_supply_sim_core_rs::decisions::allocate_fifo_by_expiry;
/// use trial_supply_sim_core_rs::models::Batch;
///
/// let day0 = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
/// let batch = |id: &str, expiry_days: i64, units: u32| Batch {
///     batch_id: id.to_string(),
///     manufacture_date: day0,
///     expiry_date: day0 + Duration::days(expiry_days),
///     available_units: units,
/// };
/// let mut pool = vec![batch("B2", 200, 200), batch("B1", 100, 30)];
///
/// let allocation = allocate_fifo_by_expiry(&mut pool, &["B1", "B2"], 50);
/// assert_eq!(allocation.batch_ids, vec!["B1", "B2"]);
/// assert_eq!(pool[1].available_units, 0);
/// assert_eq!(pool[0].available_units, 180);
/// ```
pub fn allocate_fifo_by_expiry<S: AsRef<str>>(batches: &mut [Batch], eligible: &[S], quantity: u32) -> Allocation {
    let mut order: Vec<usize> = batches
        .iter()
        .enumerate()
        .filter(|(_, b)| eligible.iter().any(|id| id.as_ref() == b.batch_id))
        .map(|(idx, _)| idx)
        .collect();
    order.sort_by_key(|&idx| batches[idx].expiry_date);

    let mut remaining = quantity;
    let mut batch_ids = Vec::new();

    for idx in order {
        if remaining == 0 {
            break;
        }
        let batch = &mut batches[idx];
        let take = remaining.min(batch.available_units);
        if take > 0 {
            batch.available_units -= take;
            remaining -= take;
            batch_ids.push(batch.batch_id.clone());
        }
    }

    Allocation {
        batch_ids,
        allocated_units: quantity - remaining,
        shortfall: remaining,
    }
}
