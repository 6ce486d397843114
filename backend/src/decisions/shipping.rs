//! Shipment planning arithmetic

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Cost schedule applied by the logistics agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingTariff {
    pub base: i64,
    pub per_batch: i64,
    pub expedite_surcharge: i64,
    /// Lead times at or below this many days are expedited
    pub expedite_threshold_days: i64,
}

impl Default for ShippingTariff {
    fn default() -> Self {
        Self {
            base: 500,
            per_batch: 120,
            expedite_surcharge: 400,
            expedite_threshold_days: 2,
        }
    }
}

/// Planned dates and cost for one shipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentQuote {
    pub lead_days: i64,
    pub expedited: bool,
    pub cost: i64,
    pub departure: DateTime<Utc>,
    pub eta: DateTime<Utc>,
}

impl ShippingTariff {
    /// Quote a shipment of `batch_count` batches requested at `now`
    ///
    /// Departure is the next day. An expedited shipment arrives the next day,
    /// a standard one the day after.
    pub fn quote(&self, now: DateTime<Utc>, target_delivery: DateTime<Utc>, batch_count: usize) -> ShipmentQuote {
        let lead_days = lead_days(now, target_delivery);
        let expedited = lead_days <= self.expedite_threshold_days;
        let cost = self.base
            + self.per_batch * batch_count as i64
            + if expedited { self.expedite_surcharge } else { 0 };

        ShipmentQuote {
            lead_days,
            expedited,
            cost,
            departure: now + Duration::days(1),
            eta: now + Duration::days(if expedited { 1 } else { 2 }),
        }
    }
}

/// Calendar days from `today` to `target`, never less than one
pub fn lead_days(today: DateTime<Utc>, target: DateTime<Utc>) -> i64 {
    (target.date_naive() - today.date_naive()).num_days().max(1)
}

/// Shipment cost reached through human negotiation
///
/// Two quoted batches at the standard rate; more than two negotiation rounds
/// add a flat penalty. Fewer rounds do not lower the cost.
pub fn negotiated_shipment_cost(logistics_rounds: u32) -> f64 {
    let penalty = if logistics_rounds > 2 { 200 } else { 0 };
    (500 + 120 * 2 + penalty) as f64
}
