//! Agent state records
//!
//! Each agent role keeps a named record of what it has received and planned.
//! The records are plain data: they are returned with the agent-regime result
//! and never shared between runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Something an agent is tracking before it turns into a shipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PendingOrder {
    SiteActivated {
        site_id: String,
        activation_date: DateTime<Utc>,
    },
    Allocation {
        batch_ids: Vec<String>,
        release_date: DateTime<Utc>,
        constraints: Vec<String>,
    },
}

/// A shipment an agent has planned or been told about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    pub shipment_id: Option<String>,
    /// Only known on the planning side (Logistics)
    pub site_id: Option<String>,
    pub batch_ids: Vec<String>,
    pub eta: DateTime<Utc>,
    pub cost: i64,
}

/// Named state shared by every agent role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub name: String,
    pub pending_orders: Vec<PendingOrder>,
    pub active_shipments: Vec<ShipmentRecord>,
}

impl AgentState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pending_orders: Vec::new(),
            active_shipments: Vec::new(),
        }
    }
}
