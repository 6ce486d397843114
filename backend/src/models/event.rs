//! Timeline events and the message bus they are logged to.
//!
//! Every communication or system action in either regime becomes one
//! [`TimelineEvent`]. Events are appended to a [`MessageBus`] in the order
//! they happen; the bus never reorders, mutates, or drops them.
//!
//! # Channels
//!
//! Events are categorized by how the communication happened:
//! - **mcp**: system-to-system query issued by an agent
//! - **a2a**: agent-to-agent message
//! - **email**: ad-hoc human email
//! - **ticket**: workflow ticket opened or updated
//! - **manual**: a human reading a report or making a decision
//! - **system**: a human checking a dashboard or report
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use trial_supply_sim_core_rs::models::event::{Channel, MessageBus, TimelineEvent};
//!
//! let at = Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap();
//! let mut bus = MessageBus::new();
//! bus.log(TimelineEvent::human(
//!     at,
//!     Channel::Email,
//!     "CRO (Human)",
//!     "Clinical Ops (Human)",
//!     "Email sent: Weekly enrollment report",
//!     "Excel attachment for US-BOS-001",
//! ));
//!
//! assert_eq!(bus.len(), 1);
//! assert_eq!(bus.export()[0].channel, Channel::Email);
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire protocol of an agent-era event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    /// Structured system query
    Mcp,
    /// Agent-to-agent message
    A2a,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Mcp => "MCP",
            Protocol::A2a => "A2A",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Communication channel of an event (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Mcp,
    A2a,
    Email,
    Ticket,
    Manual,
    System,
}

impl Channel {
    pub const ALL: [Channel; 6] = [
        Channel::Mcp,
        Channel::A2a,
        Channel::Email,
        Channel::Ticket,
        Channel::Manual,
        Channel::System,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Mcp => "mcp",
            Channel::A2a => "a2a",
            Channel::Email => "email",
            Channel::Ticket => "ticket",
            Channel::Manual => "manual",
            Channel::System => "system",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logged, timestamped action or message exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub timestamp: DateTime<Utc>,
    /// Absent for purely human actions
    pub protocol: Option<Protocol>,
    pub channel: Channel,
    pub actor: String,
    pub target: Option<String>,
    pub action: String,
    pub details: String,
}

impl TimelineEvent {
    /// System-to-system query event
    pub fn mcp(
        timestamp: DateTime<Utc>,
        actor: impl Into<String>,
        target: impl Into<String>,
        action: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            protocol: Some(Protocol::Mcp),
            channel: Channel::Mcp,
            actor: actor.into(),
            target: Some(target.into()),
            action: action.into(),
            details: details.into(),
        }
    }

    /// Agent-to-agent message event
    pub fn a2a(
        timestamp: DateTime<Utc>,
        actor: impl Into<String>,
        target: impl Into<String>,
        action: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            protocol: Some(Protocol::A2a),
            channel: Channel::A2a,
            actor: actor.into(),
            target: Some(target.into()),
            action: action.into(),
            details: details.into(),
        }
    }

    /// Human-driven event (email, ticket, manual review, dashboard lookup)
    pub fn human(
        timestamp: DateTime<Utc>,
        channel: Channel,
        actor: impl Into<String>,
        target: impl Into<String>,
        action: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            protocol: None,
            channel,
            actor: actor.into(),
            target: Some(target.into()),
            action: action.into(),
            details: details.into(),
        }
    }

    /// Target, or an empty string when the event has none
    pub fn target_or_empty(&self) -> &str {
        self.target.as_deref().unwrap_or("")
    }
}

/// Append-only event log for one simulation run.
///
/// Insertion order is chronological order: the logical clock of a run never
/// moves backwards, so events are logged with non-decreasing timestamps.
#[derive(Debug, Clone, Default)]
pub struct MessageBus {
    events: Vec<TimelineEvent>,
}

impl MessageBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Append an event
    pub fn log(&mut self, event: TimelineEvent) {
        debug_assert!(
            self.events
                .last()
                .map_or(true, |last| last.timestamp <= event.timestamp),
            "events must be logged in chronological order"
        );
        tracing::debug!(
            channel = %event.channel,
            actor = %event.actor,
            target = event.target_or_empty(),
            action = %event.action,
            "timeline event"
        );
        self.events.push(event);
    }

    /// Ordered, owned snapshot of every event logged so far
    pub fn export(&self) -> Vec<TimelineEvent> {
        self.events.clone()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    /// Events logged on a specific channel
    pub fn events_on_channel(&self, channel: Channel) -> Vec<&TimelineEvent> {
        self.events.iter().filter(|e| e.channel == channel).collect()
    }

    /// Events originated by a specific actor
    pub fn events_for_actor(&self, actor: &str) -> Vec<&TimelineEvent> {
        self.events.iter().filter(|e| e.actor == actor).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 3, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_channel_serializes_lowercase() {
        let json = serde_json::to_string(&Channel::A2a).unwrap();
        assert_eq!(json, "\"a2a\"");
    }

    #[test]
    fn test_protocol_serializes_uppercase() {
        let json = serde_json::to_string(&Protocol::Mcp).unwrap();
        assert_eq!(json, "\"MCP\"");
    }

    #[test]
    fn test_human_event_has_no_protocol() {
        let event = TimelineEvent::human(at(9), Channel::Ticket, "A", "B", "open", "");
        assert_eq!(event.protocol, None);
        assert_eq!(event.target.as_deref(), Some("B"));
    }

    #[test]
    fn test_target_or_empty() {
        let mut event = TimelineEvent::mcp(at(9), "Agent", "ERP", "get_erp_inventory", "");
        assert_eq!(event.target_or_empty(), "ERP");
        event.target = None;
        assert_eq!(event.target_or_empty(), "");
    }

    #[test]
    fn test_bus_query_by_channel_and_actor() {
        let mut bus = MessageBus::new();
        bus.log(TimelineEvent::mcp(at(9), "MES Agent", "LIMS", "get_batch_stability", ""));
        bus.log(TimelineEvent::a2a(at(9), "MES Agent", "Clinical Ops Agent", "AllocateLotResponse", ""));
        bus.log(TimelineEvent::a2a(at(10), "Logistics Agent", "Clinical Ops Agent", "ShipmentPlan", ""));

        assert_eq!(bus.events_on_channel(Channel::A2a).len(), 2);
        assert_eq!(bus.events_on_channel(Channel::Email).len(), 0);
        assert_eq!(bus.events_for_actor("MES Agent").len(), 2);
    }

    #[test]
    fn test_export_preserves_every_field() {
        let mut bus = MessageBus::new();
        let event = TimelineEvent::mcp(at(9), "Clinical Ops Agent", "ERP", "get_erp_inventory", "Total units available: 10");
        bus.log(event.clone());

        let snapshot = bus.export();
        assert_eq!(snapshot, vec![event]);
    }
}
