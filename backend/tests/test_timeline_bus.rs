//! Append-only timeline bus behaviour

use chrono::{DateTime, Duration, TimeZone, Utc};
use trial_supply_sim_core_rs::{Channel, MessageBus, TimelineEvent};

fn at(hours: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap() + Duration::hours(hours)
}

#[test]
fn test_export_twice_is_identical() {
    let mut bus = MessageBus::new();
    bus.log(TimelineEvent::mcp(at(0), "MES Agent", "LIMS", "get_batch_stability", "Fetched 10 batches"));
    bus.log(TimelineEvent::a2a(at(0), "Clinical Ops Agent", "MES Agent", "AllocateLotRequest", "site=US-BOS-001, qty=50"));

    assert_eq!(bus.export(), bus.export());
    assert_eq!(bus.len(), 2);
}

#[test]
fn test_export_is_a_snapshot() {
    let mut bus = MessageBus::new();
    bus.log(TimelineEvent::human(at(0), Channel::Email, "CRO (Human)", "Clinical Ops (Human)", "Email sent", ""));
    let snapshot = bus.export();

    bus.log(TimelineEvent::human(at(1), Channel::Manual, "Clinical Ops (Human)", "Clinical Ops (Human)", "Report reviewed", ""));
    assert_eq!(snapshot.len(), 1);
    assert_eq!(bus.len(), 2);
}

#[test]
fn test_empty_bus_exports_nothing() {
    let bus = MessageBus::new();
    assert!(bus.is_empty());
    assert!(bus.export().is_empty());
}

#[test]
fn test_channel_and_actor_queries() {
    let mut bus = MessageBus::new();
    bus.log(TimelineEvent::human(at(0), Channel::Ticket, "A", "B", "Ticket opened", ""));
    bus.log(TimelineEvent::human(at(2), Channel::System, "B", "B", "System lookup", ""));
    bus.log(TimelineEvent::human(at(3), Channel::Ticket, "B", "A", "Ticket update", ""));

    assert_eq!(bus.events_on_channel(Channel::Ticket).len(), 2);
    assert_eq!(bus.events_for_actor("B").len(), 2);
    assert!(bus.events_on_channel(Channel::Mcp).is_empty());
}

#[test]
fn test_event_json_shape() {
    let event = TimelineEvent::mcp(at(0), "Logistics Agent", "WMS", "get_depot_inventory", "US-DEPOT-1");
    let json = serde_json::to_value(&event).unwrap();

    assert_eq!(json["protocol"], "MCP");
    assert_eq!(json["channel"], "mcp");
    assert_eq!(json["target"], "WMS");
}
