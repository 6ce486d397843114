//! Clinical Ops agent: the coordinator of the agent regime.
//!
//! Clinical Ops is the receiving end of every hop, so it is where the
//! agent-to-agent events are logged: one event per message, attributed to the
//! sender.

use chrono::{DateTime, Utc};

use super::{
    AgentContext, SupplyAgent, CLINICAL_OPS_AGENT, CRO_INTERFACE_AGENT, LOGISTICS_AGENT, MES_AGENT,
};
use crate::models::{
    AgentState, AllocateLotRequest, AllocateLotResponse, CreateShipmentRequest, ErpInventory, PendingOrder,
    ShipmentPlan, ShipmentRecord, SiteActivatedEvent, TimelineEvent,
};

#[derive(Debug, Clone)]
pub struct ClinicalOpsAgent {
    state: AgentState,
}

impl Default for ClinicalOpsAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl ClinicalOpsAgent {
    pub fn new() -> Self {
        Self {
            state: AgentState::new(CLINICAL_OPS_AGENT),
        }
    }

    pub fn receive_site_activated(&mut self, ctx: &mut AgentContext<'_>, event: &SiteActivatedEvent) {
        self.state.pending_orders.push(PendingOrder::SiteActivated {
            site_id: event.site_id.clone(),
            activation_date: event.activation_date,
        });
        ctx.bus.log(TimelineEvent::a2a(
            ctx.now,
            CRO_INTERFACE_AGENT,
            CLINICAL_OPS_AGENT,
            "SiteActivatedEvent",
            format!("Site {} activated", event.site_id),
        ));
    }

    pub fn query_erp_inventory(&self, ctx: &mut AgentContext<'_>) -> ErpInventory {
        ctx.systems.get_erp_inventory(ctx.bus, self.caller(ctx.now))
    }

    pub fn send_allocate_request(
        &self,
        ctx: &mut AgentContext<'_>,
        study_id: &str,
        site_id: &str,
        quantity: u32,
    ) -> AllocateLotRequest {
        let req = AllocateLotRequest::new(ctx.ids, ctx.now, study_id, site_id, quantity);
        ctx.bus.log(TimelineEvent::a2a(
            ctx.now,
            CLINICAL_OPS_AGENT,
            MES_AGENT,
            "AllocateLotRequest",
            format!("site={}, qty={}", site_id, quantity),
        ));
        req
    }

    pub fn receive_allocate_response(&mut self, ctx: &mut AgentContext<'_>, resp: &AllocateLotResponse) {
        self.state.pending_orders.push(PendingOrder::Allocation {
            batch_ids: resp.batch_ids.clone(),
            release_date: resp.release_date,
            constraints: resp.constraints.clone(),
        });
        ctx.bus.log(TimelineEvent::a2a(
            ctx.now,
            MES_AGENT,
            CLINICAL_OPS_AGENT,
            "AllocateLotResponse",
            format!(
                "batches={} release={}",
                resp.batch_ids.join(","),
                resp.release_date.date_naive()
            ),
        ));
    }

    pub fn send_create_shipment(
        &self,
        ctx: &mut AgentContext<'_>,
        site_id: &str,
        batch_ids: Vec<String>,
        target_delivery_date: DateTime<Utc>,
    ) -> CreateShipmentRequest {
        let details = format!("site={}, batches={}", site_id, batch_ids.join(","));
        let req = CreateShipmentRequest::new(ctx.ids, ctx.now, site_id, batch_ids, target_delivery_date);
        ctx.bus.log(TimelineEvent::a2a(
            ctx.now,
            CLINICAL_OPS_AGENT,
            LOGISTICS_AGENT,
            "CreateShipmentRequest",
            details,
        ));
        req
    }

    pub fn receive_shipment_plan(&mut self, ctx: &mut AgentContext<'_>, plan: &ShipmentPlan) {
        self.state.active_shipments.push(ShipmentRecord {
            shipment_id: Some(plan.shipment_id.clone()),
            site_id: None,
            batch_ids: Vec::new(),
            eta: plan.eta,
            cost: plan.cost,
        });
        ctx.bus.log(TimelineEvent::a2a(
            ctx.now,
            LOGISTICS_AGENT,
            CLINICAL_OPS_AGENT,
            "ShipmentPlan",
            format!(
                "shipment={} eta={} cost=${}",
                plan.shipment_id,
                plan.eta.date_naive(),
                format_thousands(plan.cost)
            ),
        ));
    }
}

impl SupplyAgent for ClinicalOpsAgent {
    fn state(&self) -> &AgentState {
        &self.state
    }
}

/// `1234567` → `"1,234,567"`
fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0 {
        out.insert(0, '-');
    }
    out
}
