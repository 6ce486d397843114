//! Manufacturing (MES) agent: lot allocation against LIMS data.

use chrono::Duration;

use super::{AgentContext, SupplyAgent, MES_AGENT};
use crate::decisions::allocate_fifo_by_expiry;
use crate::models::{AgentState, AllocateLotRequest, AllocateLotResponse};

#[derive(Debug, Clone)]
pub struct ManufacturingAgent {
    state: AgentState,
}

impl Default for ManufacturingAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl ManufacturingAgent {
    pub fn new() -> Self {
        Self {
            state: AgentState::new(MES_AGENT),
        }
    }

    /// Allocate lots for a request
    ///
    /// Only batches still in date on the release date (`now + release_lead_days`)
    /// are eligible; they are consumed earliest-expiry first. A shortfall is
    /// reported as a constraint note and the partial allocation goes ahead.
    pub fn allocate_lots(
        &mut self,
        ctx: &mut AgentContext<'_>,
        req: &AllocateLotRequest,
        release_lead_days: i64,
    ) -> AllocateLotResponse {
        let release_date = ctx.now + Duration::days(release_lead_days);
        let caller = self.caller(ctx.now);

        let pool: Vec<String> = ctx
            .systems
            .get_batch_stability(ctx.bus, caller)
            .iter()
            .map(|b| b.batch_id.clone())
            .collect();
        let eligible: Vec<String> = pool
            .into_iter()
            .filter(|id| ctx.systems.check_batch_expiry(ctx.bus, caller, id, release_date))
            .collect();

        let allocation = allocate_fifo_by_expiry(ctx.systems.batches_mut(), &eligible, req.quantity);
        if allocation.is_partial() {
            tracing::warn!(
                site = %req.site_id,
                requested = req.quantity,
                allocated = allocation.allocated_units,
                "partial allocation"
            );
        }

        AllocateLotResponse {
            message_id: ctx.ids.next_uuid(),
            timestamp: ctx.now,
            request_id: req.message_id,
            constraints: allocation.constraint_notes(),
            batch_ids: allocation.batch_ids,
            allocated_units: allocation.allocated_units,
            release_date,
        }
    }
}

impl SupplyAgent for ManufacturingAgent {
    fn state(&self) -> &AgentState {
        &self.state
    }
}
