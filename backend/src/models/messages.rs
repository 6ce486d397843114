//! Agent-to-agent message types.
//!
//! Every message carries its own identifier and timestamp. Responses carry the
//! originating request's identifier in `request_id` for correlation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::rng::IdGenerator;

/// Interface agent → Clinical Ops: a site has been activated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteActivatedEvent {
    pub event_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub study_id: String,
    pub site_id: String,
    pub activation_date: DateTime<Utc>,
}

impl SiteActivatedEvent {
    pub fn new(ids: &mut IdGenerator, at: DateTime<Utc>, study_id: &str, site_id: &str) -> Self {
        Self {
            event_id: ids.next_uuid(),
            timestamp: at,
            study_id: study_id.to_string(),
            site_id: site_id.to_string(),
            activation_date: at,
        }
    }
}

/// Clinical Ops → Manufacturing: reserve units for a site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocateLotRequest {
    pub message_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub study_id: String,
    pub site_id: String,
    pub quantity: u32,
}

impl AllocateLotRequest {
    pub fn new(ids: &mut IdGenerator, at: DateTime<Utc>, study_id: &str, site_id: &str, quantity: u32) -> Self {
        Self {
            message_id: ids.next_uuid(),
            timestamp: at,
            study_id: study_id.to_string(),
            site_id: site_id.to_string(),
            quantity,
        }
    }
}

/// Manufacturing → Clinical Ops: batches reserved for a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocateLotResponse {
    pub message_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub request_id: Uuid,
    /// Touched batches in the order they were consumed (earliest expiry first)
    pub batch_ids: Vec<String>,
    /// Units actually reserved (never more than requested)
    pub allocated_units: u32,
    pub release_date: DateTime<Utc>,
    pub constraints: Vec<String>,
}

impl AllocateLotResponse {
    pub fn is_partial(&self) -> bool {
        !self.constraints.is_empty()
    }
}

/// Clinical Ops → Logistics: ship the allocated batches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateShipmentRequest {
    pub message_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub site_id: String,
    pub batch_ids: Vec<String>,
    pub target_delivery_date: DateTime<Utc>,
}

impl CreateShipmentRequest {
    pub fn new(
        ids: &mut IdGenerator,
        at: DateTime<Utc>,
        site_id: &str,
        batch_ids: Vec<String>,
        target_delivery_date: DateTime<Utc>,
    ) -> Self {
        Self {
            message_id: ids.next_uuid(),
            timestamp: at,
            site_id: site_id.to_string(),
            batch_ids,
            target_delivery_date,
        }
    }
}

/// Logistics → Clinical Ops: the planned shipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentPlan {
    pub message_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub request_id: Uuid,
    pub shipment_id: String,
    pub departure_date: DateTime<Utc>,
    pub eta: DateTime<Utc>,
    /// Whole currency units
    pub cost: i64,
    pub expedited: bool,
}
