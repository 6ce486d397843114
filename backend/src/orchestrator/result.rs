//! Read-only outputs of a finished run

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    AgentState, AllocateLotResponse, Batch, Metrics, ShipmentPlan, SiteDescriptor, TimelineEvent,
};

/// Which coordination regime produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Emails, tickets and manual lookups
    Human,
    /// Structured queries and agent-to-agent messages
    Agent,
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Regime::Human => f.write_str("human"),
            Regime::Agent => f.write_str("agent"),
        }
    }
}

/// Everything exported by one regime run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub regime: Regime,
    pub seed: u64,
    pub site: SiteDescriptor,
    pub started_at: DateTime<Utc>,
    /// Events in logged (chronological) order
    pub timeline: Vec<TimelineEvent>,
    pub metrics: Metrics,
    /// Batch pool after the run
    pub final_batches: Vec<Batch>,
}

impl RunResult {
    pub fn event_count(&self) -> usize {
        self.timeline.len()
    }

    pub fn last_event_at(&self) -> Option<DateTime<Utc>> {
        self.timeline.last().map(|e| e.timestamp)
    }
}

/// Agent-regime result with the message exchange it went through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRunResult {
    pub run: RunResult,
    pub allocation: AllocateLotResponse,
    pub shipment: ShipmentPlan,
    /// Final state of every agent role, in interface → logistics order
    pub agents: Vec<AgentState>,
}
