//! Logistics agent: shipment planning.

use super::{AgentContext, SupplyAgent, LOGISTICS_AGENT};
use crate::decisions::ShippingTariff;
use crate::models::{AgentState, CreateShipmentRequest, ShipmentPlan, ShipmentRecord};

#[derive(Debug, Clone)]
pub struct LogisticsAgent {
    state: AgentState,
    tariff: ShippingTariff,
}

impl Default for LogisticsAgent {
    fn default() -> Self {
        Self::new(ShippingTariff::default())
    }
}

impl LogisticsAgent {
    pub fn new(tariff: ShippingTariff) -> Self {
        Self {
            state: AgentState::new(LOGISTICS_AGENT),
            tariff,
        }
    }

    /// Check depot stock and compliance, then price the shipment
    pub fn plan_shipment(&mut self, ctx: &mut AgentContext<'_>, req: &CreateShipmentRequest) -> ShipmentPlan {
        let caller = self.caller(ctx.now);
        let inventory = ctx.systems.get_depot_inventory(ctx.bus, caller);
        let rules = ctx.systems.check_compliance_rules(ctx.bus, caller, &req.site_id);
        tracing::debug!(
            depot = %inventory.depot_id,
            temperature = rules.get("temperature").map(String::as_str).unwrap_or(""),
            "shipment constraints checked"
        );

        let quote = self.tariff.quote(ctx.now, req.target_delivery_date, req.batch_ids.len());

        let message_id = ctx.ids.next_uuid();
        let shipment_id = ctx.ids.next_short();

        self.state.active_shipments.push(ShipmentRecord {
            shipment_id: Some(shipment_id.clone()),
            site_id: Some(req.site_id.clone()),
            batch_ids: req.batch_ids.clone(),
            eta: quote.eta,
            cost: quote.cost,
        });

        ShipmentPlan {
            message_id,
            timestamp: ctx.now,
            request_id: req.message_id,
            shipment_id,
            departure_date: quote.departure,
            eta: quote.eta,
            cost: quote.cost,
            expedited: quote.expedited,
        }
    }
}

impl SupplyAgent for LogisticsAgent {
    fn state(&self) -> &AgentState {
        &self.state
    }
}
