//! Scenario configuration
//!
//! All parameters needed to run either regime. Every struct deserializes from
//! JSON with per-field defaults, so a scenario file only names what it
//! overrides:
//!
//! ```rust
//! use trial_supply_sim_core_rs::orchestrator::ScenarioConfig;
//!
//! let config = ScenarioConfig::from_json_str(r#"{
//!     "seed": 7,
//!     "human": { "logistics_rounds": 3 }
//! }"#).unwrap();
//!
//! assert_eq!(config.seed, 7);
//! assert_eq!(config.human.logistics_rounds, 3);
//! assert_eq!(config.human.cro_review_delay_hours, 168.0);
//! assert_eq!(config.agent.initial_quantity, 50);
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::SimulationError;
use crate::core::time::hours_to_duration;
use crate::decisions::ShippingTariff;
use crate::models::SiteDescriptor;
use crate::reference::{LOOKAHEAD_DAYS, LOOKBACK_DAYS};

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_STUDY_ID: &str = "STUDY-ALPHA";

/// Largest accepted single human-regime duration (ten years)
pub const MAX_DURATION_HOURS: f64 = 24.0 * 3_660.0;

/// Largest accepted number of logistics negotiation rounds
pub const MAX_LOGISTICS_ROUNDS: u32 = 1_000;

/// Largest accepted agent-regime day offset or forecast horizon (ten years)
pub const MAX_DAYS: i64 = 3_660;

/// `start + offset`, or `InvalidConfig` when it leaves the representable range
fn checked_offset(start: DateTime<Utc>, offset: Duration, what: &str) -> Result<DateTime<Utc>, SimulationError> {
    start.checked_add_signed(offset).ok_or_else(|| {
        SimulationError::InvalidConfig(format!("{} out of range for start {}", what, start.to_rfc3339()))
    })
}

/// Complete scenario configuration
///
/// * `seed` - Seed for reference data, forecast noise and message ids
/// * `start` - Run-start instant; `None` means the caller decides (see
///   [`ScenarioConfig::start_or`])
/// * `site` - Site being activated
/// * `human` / `agent` - Per-regime knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub seed: u64,
    pub study_id: String,
    pub site: SiteDescriptor,
    pub start: Option<DateTime<Utc>>,
    pub human: HumanRegimeConfig,
    pub agent: AgentRegimeConfig,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            study_id: DEFAULT_STUDY_ID.to_string(),
            site: SiteDescriptor::default(),
            start: None,
            human: HumanRegimeConfig::default(),
            agent: AgentRegimeConfig::default(),
        }
    }
}

impl ScenarioConfig {
    pub fn from_json_str(json: &str) -> Result<Self, SimulationError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pinned start instant, or `fallback` when the scenario leaves it open
    pub fn start_or(&self, fallback: DateTime<Utc>) -> DateTime<Utc> {
        self.start.unwrap_or(fallback)
    }

    /// Validate fields shared by both regimes
    pub fn validate_common(&self) -> Result<(), SimulationError> {
        if self.study_id.trim().is_empty() {
            return Err(SimulationError::InvalidConfig(
                "study_id must not be empty".to_string(),
            ));
        }
        if self.site.site_id.trim().is_empty() {
            return Err(SimulationError::InvalidConfig(
                "site.site_id must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Check that the reference data window around `start` is representable
    ///
    /// Batches are dated up to `LOOKBACK_DAYS` before and `LOOKAHEAD_DAYS`
    /// after the start date.
    pub fn validate_start(&self, start: DateTime<Utc>) -> Result<(), SimulationError> {
        checked_offset(start, -Duration::days(LOOKBACK_DAYS + 1), "reference batch dates")?;
        checked_offset(start, Duration::days(LOOKAHEAD_DAYS), "reference batch dates")?;
        Ok(())
    }
}

/// Knobs for the human-driven regime (all durations in hours)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HumanRegimeConfig {
    /// Weekly report review cadence
    pub cro_review_delay_hours: f64,
    /// Depot/WMS ticket queue
    pub wms_queue_delay_hours: f64,
    /// MES/QA ticket queue
    pub mesqa_queue_delay_hours: f64,
    /// When set, replaces both per-team queue delays
    pub ticket_queue_delay_hours: Option<f64>,
    /// Dashboard/report check
    pub system_lookup_delay_hours: f64,
    /// Turnaround of one logistics negotiation round
    pub logistics_roundtrip_hours: f64,
    pub logistics_rounds: u32,
    /// One-time clarification detour after round 1; zero disables it
    pub email_clarification_delay_hours: f64,
}

impl Default for HumanRegimeConfig {
    fn default() -> Self {
        Self {
            cro_review_delay_hours: 24.0 * 7.0,
            wms_queue_delay_hours: 18.0,
            mesqa_queue_delay_hours: 24.0,
            ticket_queue_delay_hours: None,
            system_lookup_delay_hours: 0.5,
            logistics_roundtrip_hours: 8.0,
            logistics_rounds: 2,
            email_clarification_delay_hours: 8.0,
        }
    }
}

impl HumanRegimeConfig {
    pub fn wms_queue_delay(&self) -> f64 {
        self.ticket_queue_delay_hours.unwrap_or(self.wms_queue_delay_hours)
    }

    pub fn mesqa_queue_delay(&self) -> f64 {
        self.ticket_queue_delay_hours.unwrap_or(self.mesqa_queue_delay_hours)
    }

    pub fn has_email_clarification(&self) -> bool {
        self.email_clarification_delay_hours > 0.0
    }

    /// Events the script will log for this configuration
    pub fn expected_event_count(&self) -> usize {
        let detour = if self.has_email_clarification() { 2 } else { 0 };
        8 + 2 * self.logistics_rounds as usize + detour
    }

    /// Hours the clock will advance over the whole script
    pub fn expected_latency_hours(&self) -> f64 {
        let detour = if self.has_email_clarification() {
            self.email_clarification_delay_hours
        } else {
            0.0
        };
        self.cro_review_delay_hours
            + self.wms_queue_delay()
            + self.system_lookup_delay_hours
            + self.mesqa_queue_delay()
            + self.system_lookup_delay_hours
            + self.logistics_roundtrip_hours * f64::from(self.logistics_rounds)
            + detour
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        let mut durations = vec![
            ("cro_review_delay_hours", self.cro_review_delay_hours),
            ("wms_queue_delay_hours", self.wms_queue_delay_hours),
            ("mesqa_queue_delay_hours", self.mesqa_queue_delay_hours),
            ("system_lookup_delay_hours", self.system_lookup_delay_hours),
            ("logistics_roundtrip_hours", self.logistics_roundtrip_hours),
            ("email_clarification_delay_hours", self.email_clarification_delay_hours),
        ];
        if let Some(shared) = self.ticket_queue_delay_hours {
            durations.push(("ticket_queue_delay_hours", shared));
        }

        for (name, value) in durations {
            if !value.is_finite() {
                return Err(SimulationError::InvalidConfig(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
            if value < 0.0 {
                return Err(SimulationError::InvalidConfig(format!(
                    "{} must be >= 0, got {}",
                    name, value
                )));
            }
            if value > MAX_DURATION_HOURS {
                return Err(SimulationError::InvalidConfig(format!(
                    "{} must be <= {}, got {}",
                    name, MAX_DURATION_HOURS, value
                )));
            }
        }

        if self.logistics_rounds == 0 {
            return Err(SimulationError::InvalidConfig(
                "logistics_rounds must be > 0".to_string(),
            ));
        }
        if self.logistics_rounds > MAX_LOGISTICS_ROUNDS {
            return Err(SimulationError::InvalidConfig(format!(
                "logistics_rounds must be <= {}, got {}",
                MAX_LOGISTICS_ROUNDS, self.logistics_rounds
            )));
        }

        Ok(())
    }

    /// Check that the whole script stays representable from `start`
    ///
    /// Call after [`HumanRegimeConfig::validate`], which bounds every term.
    pub fn validate_at(&self, start: DateTime<Utc>) -> Result<(), SimulationError> {
        checked_offset(start, hours_to_duration(self.expected_latency_hours()), "human script end")?;
        Ok(())
    }
}

/// Knobs for the agent-driven regime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentRegimeConfig {
    /// Units requested for the initial stocking of the site
    pub initial_quantity: u32,
    /// Horizon of the forecast fetched when the site activates
    pub forecast_horizon_days: usize,
    /// Horizon of the forecast used for the accuracy metric
    pub accuracy_horizon_days: usize,
    /// Batches must be in date this many days from now
    pub release_lead_days: i64,
    /// Requested delivery, days from now
    pub target_delivery_days: i64,
    pub tariff: ShippingTariff,
}

impl Default for AgentRegimeConfig {
    fn default() -> Self {
        Self {
            initial_quantity: 50,
            forecast_horizon_days: 90,
            accuracy_horizon_days: 7,
            release_lead_days: 3,
            target_delivery_days: 3,
            tariff: ShippingTariff::default(),
        }
    }
}

impl AgentRegimeConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.initial_quantity == 0 {
            return Err(SimulationError::InvalidConfig(
                "initial_quantity must be > 0".to_string(),
            ));
        }
        if self.forecast_horizon_days == 0 || self.accuracy_horizon_days == 0 {
            return Err(SimulationError::InvalidConfig(
                "forecast horizons must be > 0".to_string(),
            ));
        }
        for (name, horizon) in [
            ("forecast_horizon_days", self.forecast_horizon_days),
            ("accuracy_horizon_days", self.accuracy_horizon_days),
        ] {
            if horizon as u64 > MAX_DAYS as u64 {
                return Err(SimulationError::InvalidConfig(format!(
                    "{} must be <= {}, got {}",
                    name, MAX_DAYS, horizon
                )));
            }
        }
        for (name, offset) in [
            ("release_lead_days", self.release_lead_days),
            ("target_delivery_days", self.target_delivery_days),
        ] {
            if offset < 0 {
                return Err(SimulationError::InvalidConfig(format!(
                    "{} must be >= 0, got {}",
                    name, offset
                )));
            }
            if offset > MAX_DAYS {
                return Err(SimulationError::InvalidConfig(format!(
                    "{} must be <= {}, got {}",
                    name, MAX_DAYS, offset
                )));
            }
        }
        Ok(())
    }

    /// Check that every date the activation computes stays representable
    ///
    /// Covers the release date, the target delivery date and the two-day
    /// standard ETA. Call after [`AgentRegimeConfig::validate`].
    pub fn validate_at(&self, start: DateTime<Utc>) -> Result<(), SimulationError> {
        let latest = self.release_lead_days.max(self.target_delivery_days).max(2);
        checked_offset(start, Duration::days(latest), "agent activation dates")?;
        Ok(())
    }
}
