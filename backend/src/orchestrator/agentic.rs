//! Agent-driven regime ("after")
//!
//! One site activation, carried out by four agents exchanging typed messages:
//!
//! ```text
//! 1. Interface: get_trial_sites + 90-day enrollment forecast
//! 2. Interface → Clinical Ops: SiteActivatedEvent
//! 3. Clinical Ops: ERP query, then AllocateLotRequest → MES
//! 4. MES: FIFO-by-expiry allocation → AllocateLotResponse
//! 5. Clinical Ops: CreateShipmentRequest → Logistics
//! 6. Logistics: depot + compliance checks → ShipmentPlan → Clinical Ops
//! ```
//!
//! The logical clock stays at the run-start instant: every hop is an
//! immediate call, so all events share one timestamp.

use chrono::{DateTime, Duration, Utc};

use super::{AgentRegimeConfig, AgentRunResult, Regime, RunResult, ScenarioConfig, SimulationError};
use crate::agents::{
    AgentContext, ClinicalOpsAgent, CroInterfaceAgent, LogisticsAgent, ManufacturingAgent, SupplyAgent,
};
use crate::core::time::SimClock;
use crate::models::{MessageBus, Metrics, ShipmentPlan, SiteActivatedEvent, SiteDescriptor};
use crate::rng::IdGenerator;
use crate::systems::MockSystems;

/// One run of the agent-driven scenario
pub struct AgentRegime {
    seed: u64,
    study_id: String,
    site: SiteDescriptor,
    config: AgentRegimeConfig,
    bus: MessageBus,
    systems: MockSystems,
    ids: IdGenerator,
    clock: SimClock,
    interface: CroInterfaceAgent,
    clinical_ops: ClinicalOpsAgent,
    manufacturing: ManufacturingAgent,
    logistics: LogisticsAgent,
}

impl AgentRegime {
    /// Validate the scenario and set up the agents
    pub fn new(scenario: &ScenarioConfig, start: DateTime<Utc>) -> Result<Self, SimulationError> {
        scenario.validate_common()?;
        scenario.validate_start(start)?;
        scenario.agent.validate()?;
        scenario.agent.validate_at(start)?;

        Ok(Self {
            seed: scenario.seed,
            study_id: scenario.study_id.clone(),
            site: scenario.site.clone(),
            config: scenario.agent.clone(),
            bus: MessageBus::new(),
            systems: MockSystems::new(scenario.seed, start),
            ids: IdGenerator::new(scenario.seed),
            clock: SimClock::new(start),
            interface: CroInterfaceAgent::new(),
            clinical_ops: ClinicalOpsAgent::new(),
            manufacturing: ManufacturingAgent::new(),
            logistics: LogisticsAgent::new(scenario.agent.tariff),
        })
    }

    /// Run the activation to completion and derive the metrics
    pub fn run(mut self) -> AgentRunResult {
        tracing::info!(site = %self.site.site_id, seed = self.seed, "agent regime started");

        let now = self.clock.now();
        let study_id = self.study_id.clone();
        let site_id = self.site.site_id.clone();
        let mut ctx = AgentContext::new(&mut self.bus, &mut self.systems, &mut self.ids, now);

        // 1-2: discovery and activation
        let _sites = self.interface.get_sites(&mut ctx);
        let _forecast = self.interface.get_site_enrollment(
            &mut ctx,
            &study_id,
            &site_id,
            self.config.forecast_horizon_days,
        );
        let activation = self.interface.announce_activation(&mut ctx, &study_id, &site_id);
        self.clinical_ops.receive_site_activated(&mut ctx, &activation);

        // 3-4: allocation
        let _erp = self.clinical_ops.query_erp_inventory(&mut ctx);
        let alloc_req = self.clinical_ops.send_allocate_request(
            &mut ctx,
            &study_id,
            &site_id,
            self.config.initial_quantity,
        );
        let allocation = self
            .manufacturing
            .allocate_lots(&mut ctx, &alloc_req, self.config.release_lead_days);
        self.clinical_ops.receive_allocate_response(&mut ctx, &allocation);

        // 5-6: shipment
        let target_delivery = now + Duration::days(self.config.target_delivery_days);
        let ship_req = self.clinical_ops.send_create_shipment(
            &mut ctx,
            &site_id,
            allocation.batch_ids.clone(),
            target_delivery,
        );
        let shipment = self.logistics.plan_shipment(&mut ctx, &ship_req);
        self.clinical_ops.receive_shipment_plan(&mut ctx, &shipment);

        // Metrics: fresh short-horizon forecast for the accuracy figure
        let accuracy_forecast = self.interface.get_site_enrollment(
            &mut ctx,
            &study_id,
            &site_id,
            self.config.accuracy_horizon_days,
        );
        let metrics = derive_metrics(
            &activation,
            &shipment,
            self.config.initial_quantity,
            accuracy_forecast.forecast_total(),
        );

        tracing::info!(
            events = self.bus.len(),
            batches = allocation.batch_ids.len(),
            cost = shipment.cost,
            order_to_delivery_days = metrics.order_to_delivery_days,
            "agent regime finished"
        );

        let agents = vec![
            self.interface.state().clone(),
            self.clinical_ops.state().clone(),
            self.manufacturing.state().clone(),
            self.logistics.state().clone(),
        ];

        AgentRunResult {
            run: RunResult {
                regime: Regime::Agent,
                seed: self.seed,
                site: self.site,
                started_at: self.clock.start(),
                timeline: self.bus.export(),
                metrics,
                final_batches: self.systems.batches().to_vec(),
            },
            allocation,
            shipment,
            agents,
        }
    }
}

/// Metrics of a completed activation
///
/// `forecast_accuracy = min(1, supplied / forecast_total)`, or 1.0 when the
/// forecast is empty.
fn derive_metrics(
    activation: &SiteActivatedEvent,
    shipment: &ShipmentPlan,
    supplied_units: u32,
    forecast_total: u64,
) -> Metrics {
    let forecast_accuracy = if forecast_total > 0 {
        (f64::from(supplied_units) / forecast_total as f64).min(1.0)
    } else {
        1.0
    };

    Metrics {
        order_to_delivery_days: (shipment.eta - activation.activation_date).num_days() as f64,
        shipment_cost: shipment.cost as f64,
        compliance_events: 0,
        forecast_accuracy,
        latency_hours: None,
    }
}
