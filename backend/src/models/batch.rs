//! Inventory batches and the aggregate views the mock systems return.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One manufactured batch of investigational product
///
/// `available_units` is the only mutable field; it is decremented by lot
/// allocation and owned by the capability provider for the length of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub batch_id: String,
    pub manufacture_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub available_units: u32,
}

impl Batch {
    /// True iff the batch is still in date on `as_of` (expiry strictly later)
    pub fn is_valid_on(&self, as_of: DateTime<Utc>) -> bool {
        self.expiry_date > as_of
    }
}

/// Depot-level inventory view (WMS)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepotInventory {
    pub depot_id: String,
    pub country: String,
    pub batches: Vec<Batch>,
}

impl DepotInventory {
    pub fn total_units(&self) -> u64 {
        self.batches.iter().map(|b| u64::from(b.available_units)).sum()
    }
}

/// ERP totals, recomputed from current batch state on every query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErpInventory {
    pub total_units: u64,
    pub batch_count: usize,
}

/// Compliance constraints for shipping to a site
pub type ComplianceRules = BTreeMap<String, String>;
