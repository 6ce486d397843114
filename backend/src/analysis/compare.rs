//! Side-by-side comparison of a human and an agent run

use serde::{Deserialize, Serialize};

use super::stats::TimelineStats;
use crate::models::Metrics;
use crate::orchestrator::RunResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeComparison {
    pub human: Metrics,
    pub agent: Metrics,
    pub human_stats: TimelineStats,
    pub agent_stats: TimelineStats,
    pub human_events: usize,
    pub agent_events: usize,
    /// Positive when the agent regime delivers sooner
    pub days_saved: f64,
    /// Agent cost minus human cost
    pub cost_delta: f64,
}

impl RegimeComparison {
    pub fn between(human: &RunResult, agent: &RunResult) -> Self {
        Self {
            human: human.metrics,
            agent: agent.metrics,
            human_stats: TimelineStats::from_events(&human.timeline),
            agent_stats: TimelineStats::from_events(&agent.timeline),
            human_events: human.event_count(),
            agent_events: agent.event_count(),
            days_saved: human.metrics.order_to_delivery_days - agent.metrics.order_to_delivery_days,
            cost_delta: agent.metrics.shipment_cost - human.metrics.shipment_cost,
        }
    }

    /// Fraction of the human order-to-delivery time removed (0 when the
    /// human time is zero)
    pub fn speedup_ratio(&self) -> f64 {
        if self.human.order_to_delivery_days > 0.0 {
            self.days_saved / self.human.order_to_delivery_days
        } else {
            0.0
        }
    }
}
