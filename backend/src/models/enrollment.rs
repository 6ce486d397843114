//! Enrollment forecasts (CTMS).

use serde::{Deserialize, Serialize};

/// Per-site daily enrollment forecast and its running total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentData {
    pub study_id: String,
    pub site_id: String,
    pub forecast_daily: Vec<u32>,
    /// Running total; wider than a daily value so long horizons cannot wrap
    pub cumulative: Vec<u64>,
}

impl EnrollmentData {
    /// Build from a daily forecast; `cumulative[i]` is the sum of days `0..=i`
    pub fn from_daily(study_id: impl Into<String>, site_id: impl Into<String>, forecast_daily: Vec<u32>) -> Self {
        let cumulative = forecast_daily
            .iter()
            .scan(0u64, |total, &day| {
                *total += u64::from(day);
                Some(*total)
            })
            .collect();

        Self {
            study_id: study_id.into(),
            site_id: site_id.into(),
            forecast_daily,
            cumulative,
        }
    }

    /// Sum of the daily forecast over the whole horizon
    pub fn forecast_total(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    pub fn horizon_days(&self) -> usize {
        self.forecast_daily.len()
    }
}
