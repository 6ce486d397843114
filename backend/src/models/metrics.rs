//! Summary metrics derived once at the end of a run.

use serde::{Deserialize, Serialize};

/// Fixed set of named outputs for one regime
///
/// Computed from final simulation state after the script finishes; never
/// updated incrementally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub order_to_delivery_days: f64,
    pub shipment_cost: f64,
    pub compliance_events: u32,
    pub forecast_accuracy: f64,
    /// Accumulated advanced hours (human regime only)
    pub latency_hours: Option<f64>,
}

impl Metrics {
    /// Named values in a stable order, for tabular export
    pub fn named_values(&self) -> Vec<(&'static str, f64)> {
        let mut values = vec![
            ("order_to_delivery_days", self.order_to_delivery_days),
            ("shipment_cost", self.shipment_cost),
            ("compliance_events", f64::from(self.compliance_events)),
            ("forecast_accuracy", self.forecast_accuracy),
        ];
        if let Some(hours) = self.latency_hours {
            values.push(("latency_hours", hours));
        }
        values
    }
}
