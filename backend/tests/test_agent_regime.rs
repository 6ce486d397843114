//! Integration tests for the agent-driven regime

use chrono::{DateTime, Duration, TimeZone, Utc};
use trial_supply_sim_core_rs::agents::{
    AgentContext, ClinicalOpsAgent, LogisticsAgent, ManufacturingAgent, CLINICAL_OPS_AGENT, LOGISTICS_AGENT,
    MES_AGENT,
};
use trial_supply_sim_core_rs::models::PendingOrder;
use trial_supply_sim_core_rs::{
    run_agent_regime, AgentRegime, AgentRegimeConfig, Channel, IdGenerator, MessageBus, MockSystems, Protocol,
    Regime, ScenarioConfig, ShippingTariff, SimulationError,
};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap()
}

fn scenario_with(agent: AgentRegimeConfig) -> ScenarioConfig {
    ScenarioConfig {
        agent,
        ..Default::default()
    }
}

#[test]
fn test_default_activation() {
    let result = run_agent_regime(&ScenarioConfig::default(), start()).unwrap();
    let allocation = &result.allocation;

    assert_eq!(result.run.regime, Regime::Agent);
    assert!(!allocation.batch_ids.is_empty() && allocation.batch_ids.len() <= 2);
    assert_eq!(allocation.allocated_units, 50);
    assert!(allocation.constraints.is_empty());
    assert_eq!(allocation.release_date, start() + Duration::days(3));
}

#[test]
fn test_allocated_batches_sorted_by_expiry() {
    let result = run_agent_regime(&ScenarioConfig::default(), start()).unwrap();
    let systems = MockSystems::new(42, start());

    let expiries: Vec<_> = result
        .allocation
        .batch_ids
        .iter()
        .map(|id| systems.find_batch(id).unwrap().expiry_date)
        .collect();
    for pair in expiries.windows(2) {
        assert!(pair[0] <= pair[1]);
    }

    // Earliest-expiring valid batch is always taken first
    let earliest = systems
        .batches()
        .iter()
        .filter(|b| b.is_valid_on(start() + Duration::days(3)))
        .min_by_key(|b| b.expiry_date)
        .unwrap();
    assert_eq!(result.allocation.batch_ids[0], earliest.batch_id);
}

#[test]
fn test_shipment_pricing_and_eta() {
    let result = run_agent_regime(&ScenarioConfig::default(), start()).unwrap();
    let shipment = &result.shipment;
    let batch_count = result.allocation.batch_ids.len() as i64;

    assert!(!shipment.expedited);
    assert_eq!(shipment.cost, 500 + 120 * batch_count);
    assert_eq!(shipment.departure_date, start() + Duration::days(1));
    assert_eq!(shipment.eta, start() + Duration::days(2));
    assert_eq!(shipment.shipment_id.len(), 8);
}

#[test]
fn test_short_lead_time_expedites() {
    let result = run_agent_regime(
        &scenario_with(AgentRegimeConfig {
            target_delivery_days: 1,
            ..Default::default()
        }),
        start(),
    )
    .unwrap();
    let batch_count = result.allocation.batch_ids.len() as i64;

    assert!(result.shipment.expedited);
    assert_eq!(result.shipment.cost, 500 + 120 * batch_count + 400);
    assert_eq!(result.shipment.eta, start() + Duration::days(1));
    assert_eq!(result.run.metrics.order_to_delivery_days, 1.0);
}

#[test]
fn test_metrics() {
    let result = run_agent_regime(&ScenarioConfig::default(), start()).unwrap();
    let metrics = result.run.metrics;

    assert_eq!(metrics.order_to_delivery_days, 2.0);
    assert_eq!(metrics.shipment_cost, result.shipment.cost as f64);
    assert_eq!(metrics.compliance_events, 0);
    assert!(metrics.forecast_accuracy > 0.0 && metrics.forecast_accuracy <= 1.0);
    assert_eq!(metrics.latency_hours, None);
}

#[test]
fn test_responses_echo_request_ids() {
    let mut bus = MessageBus::new();
    let mut systems = MockSystems::new(42, start());
    let mut ids = IdGenerator::new(42);
    let mut ctx = AgentContext::new(&mut bus, &mut systems, &mut ids, start());

    let mut clinical_ops = ClinicalOpsAgent::new();
    let mut manufacturing = ManufacturingAgent::new();
    let mut logistics = LogisticsAgent::new(ShippingTariff::default());

    let alloc_req = clinical_ops.send_allocate_request(&mut ctx, "STUDY-ALPHA", "US-BOS-001", 50);
    let alloc_resp = manufacturing.allocate_lots(&mut ctx, &alloc_req, 3);
    clinical_ops.receive_allocate_response(&mut ctx, &alloc_resp);
    assert_eq!(alloc_resp.request_id, alloc_req.message_id);
    assert_ne!(alloc_resp.message_id, alloc_req.message_id);

    let ship_req = clinical_ops.send_create_shipment(
        &mut ctx,
        "US-BOS-001",
        alloc_resp.batch_ids.clone(),
        start() + Duration::days(3),
    );
    let plan = logistics.plan_shipment(&mut ctx, &ship_req);
    assert_eq!(plan.request_id, ship_req.message_id);
    assert_ne!(plan.message_id, ship_req.message_id);
}

#[test]
fn test_timeline_shape() {
    let result = run_agent_regime(&ScenarioConfig::default(), start()).unwrap();
    let timeline = &result.run.timeline;

    assert_eq!(timeline.len(), 22);
    assert!(timeline.iter().all(|e| e.timestamp == start()));
    assert!(timeline.iter().all(|e| e.protocol.is_some()));

    let mcp = timeline.iter().filter(|e| e.protocol == Some(Protocol::Mcp)).count();
    let a2a = timeline.iter().filter(|e| e.channel == Channel::A2a).count();
    assert_eq!(mcp, 17);
    assert_eq!(a2a, 5);

    let expiry_checks = timeline.iter().filter(|e| e.action == "check_batch_expiry").count();
    assert_eq!(expiry_checks, 10);
    assert!(timeline
        .iter()
        .filter(|e| e.action == "check_batch_expiry")
        .all(|e| e.actor == MES_AGENT && e.target.as_deref() == Some("LIMS")));

    let a2a_actions: Vec<&str> = timeline
        .iter()
        .filter(|e| e.channel == Channel::A2a)
        .map(|e| e.action.as_str())
        .collect();
    assert_eq!(
        a2a_actions,
        vec![
            "SiteActivatedEvent",
            "AllocateLotRequest",
            "AllocateLotResponse",
            "CreateShipmentRequest",
            "ShipmentPlan",
        ]
    );
    assert_eq!(timeline.last().unwrap().action, "get_enrollment_data");
}

#[test]
fn test_batch_pool_decremented() {
    let result = run_agent_regime(&ScenarioConfig::default(), start()).unwrap();
    let initial = MockSystems::new(42, start());

    let before: u64 = initial.batches().iter().map(|b| u64::from(b.available_units)).sum();
    let after: u64 = result.run.final_batches.iter().map(|b| u64::from(b.available_units)).sum();
    assert_eq!(before - after, u64::from(result.allocation.allocated_units));
}

#[test]
fn test_shortfall_allocates_all_valid_stock() {
    let result = run_agent_regime(
        &scenario_with(AgentRegimeConfig {
            initial_quantity: 100_000,
            ..Default::default()
        }),
        start(),
    )
    .unwrap();
    let initial = MockSystems::new(42, start());
    let valid_stock: u32 = initial
        .batches()
        .iter()
        .filter(|b| b.is_valid_on(start() + Duration::days(3)))
        .map(|b| b.available_units)
        .sum();

    let allocation = &result.allocation;
    assert_eq!(allocation.allocated_units, valid_stock);
    assert_eq!(
        allocation.constraints,
        vec![format!("Short {} units; partial allocation", 100_000 - valid_stock)]
    );
    assert!(result.run.final_batches.iter().all(|b| b.available_units == 0));
}

#[test]
fn test_agent_states_recorded() {
    let result = run_agent_regime(&ScenarioConfig::default(), start()).unwrap();
    assert_eq!(result.agents.len(), 4);

    let clinical_ops = result.agents.iter().find(|a| a.name == CLINICAL_OPS_AGENT).unwrap();
    assert_eq!(clinical_ops.pending_orders.len(), 2);
    assert!(matches!(clinical_ops.pending_orders[0], PendingOrder::SiteActivated { .. }));
    assert_eq!(clinical_ops.active_shipments.len(), 1);

    let logistics = result.agents.iter().find(|a| a.name == LOGISTICS_AGENT).unwrap();
    assert_eq!(logistics.active_shipments.len(), 1);
    assert_eq!(
        logistics.active_shipments[0].shipment_id.as_deref(),
        Some(result.shipment.shipment_id.as_str())
    );
}

#[test]
fn test_unrepresentable_offsets_rejected_before_run() {
    for agent in [
        AgentRegimeConfig {
            target_delivery_days: i64::MAX / 2,
            ..Default::default()
        },
        AgentRegimeConfig {
            release_lead_days: i64::MAX / 2,
            ..Default::default()
        },
        AgentRegimeConfig {
            forecast_horizon_days: 400_000,
            ..Default::default()
        },
    ] {
        let err = run_agent_regime(&scenario_with(agent), start()).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidConfig(_)));
    }
}

#[test]
fn test_long_horizon_within_bound_runs() {
    let result = run_agent_regime(
        &scenario_with(AgentRegimeConfig {
            forecast_horizon_days: 3_660,
            accuracy_horizon_days: 3_660,
            ..Default::default()
        }),
        start(),
    )
    .unwrap();
    assert!(result.run.metrics.forecast_accuracy > 0.0);
    assert!(result.run.metrics.forecast_accuracy < 0.01);
}

#[test]
fn test_invalid_agent_config_rejected() {
    let err = AgentRegime::new(
        &scenario_with(AgentRegimeConfig {
            initial_quantity: 0,
            ..Default::default()
        }),
        start(),
    );
    assert!(err.is_err());
}
