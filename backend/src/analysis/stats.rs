//! Response-time statistics over an exported timeline

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Channel, TimelineEvent};

/// Response time (days) after which the site is assumed to run out of stock
pub const STOCKOUT_AFTER_DAYS: f64 = 15.0;

/// Patients affected per stocked-out day
pub const PATIENTS_PER_STOCKOUT_DAY: f64 = 3.0;

/// Coarse supply-risk classification of a response time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplyRisk {
    Nominal,
    /// Response took more than a week
    SupplyCritical,
    /// Response took more than ten days
    StockoutRisk,
}

impl SupplyRisk {
    pub fn from_response_days(days: f64) -> Self {
        if days > 10.0 {
            SupplyRisk::StockoutRisk
        } else if days > 7.0 {
            SupplyRisk::SupplyCritical
        } else {
            SupplyRisk::Nominal
        }
    }
}

impl fmt::Display for SupplyRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupplyRisk::Nominal => f.write_str("nominal"),
            SupplyRisk::SupplyCritical => f.write_str("supply critical"),
            SupplyRisk::StockoutRisk => f.write_str("stockout risk"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineStats {
    /// First event to first manual review, in days (0 without one)
    pub detection_delay_days: f64,
    /// First to last event, in days
    pub total_response_days: f64,
    pub stockout_days: f64,
    pub patients_affected: u32,
    pub events_per_channel: BTreeMap<Channel, usize>,
    pub risk: SupplyRisk,
}

impl TimelineStats {
    pub fn from_events(events: &[TimelineEvent]) -> Self {
        let mut events_per_channel = BTreeMap::new();
        for event in events {
            *events_per_channel.entry(event.channel).or_insert(0) += 1;
        }

        let (Some(first), Some(last)) = (
            events.iter().map(|e| e.timestamp).min(),
            events.iter().map(|e| e.timestamp).max(),
        ) else {
            return Self {
                detection_delay_days: 0.0,
                total_response_days: 0.0,
                stockout_days: 0.0,
                patients_affected: 0,
                events_per_channel,
                risk: SupplyRisk::Nominal,
            };
        };

        let detection_delay_days = events
            .iter()
            .filter(|e| e.channel == Channel::Manual)
            .map(|e| e.timestamp)
            .min()
            .map(|t| days_between(first, t))
            .unwrap_or(0.0);

        let total_response_days = days_between(first, last);
        let stockout_days = (total_response_days - STOCKOUT_AFTER_DAYS).max(0.0);
        let patients_affected = (stockout_days * PATIENTS_PER_STOCKOUT_DAY).floor() as u32;

        Self {
            detection_delay_days,
            total_response_days,
            stockout_days,
            patients_affected,
            events_per_channel,
            risk: SupplyRisk::from_response_days(total_response_days),
        }
    }

    pub fn channel_count(&self, channel: Channel) -> usize {
        self.events_per_channel.get(&channel).copied().unwrap_or(0)
    }
}

fn days_between(from: chrono::DateTime<chrono::Utc>, to: chrono::DateTime<chrono::Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / (24.0 * 3600.0 * 1000.0)
}
