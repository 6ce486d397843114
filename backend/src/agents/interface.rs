//! CRO Interface agent: the CTMS-facing side of the agent regime.

use super::{AgentContext, SupplyAgent, CRO_INTERFACE_AGENT};
use crate::models::{AgentState, EnrollmentData, SiteActivatedEvent, TrialSite};

#[derive(Debug, Clone)]
pub struct CroInterfaceAgent {
    state: AgentState,
}

impl Default for CroInterfaceAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl CroInterfaceAgent {
    pub fn new() -> Self {
        Self {
            state: AgentState::new(CRO_INTERFACE_AGENT),
        }
    }

    pub fn get_sites(&self, ctx: &mut AgentContext<'_>) -> Vec<TrialSite> {
        ctx.systems.get_trial_sites(ctx.bus, self.caller(ctx.now))
    }

    pub fn get_site_enrollment(
        &self,
        ctx: &mut AgentContext<'_>,
        study_id: &str,
        site_id: &str,
        days: usize,
    ) -> EnrollmentData {
        ctx.systems
            .get_enrollment_data(ctx.bus, self.caller(ctx.now), study_id, site_id, days)
    }

    /// Build the activation message; delivery (and its event) happens on the
    /// Clinical Ops side
    pub fn announce_activation(&self, ctx: &mut AgentContext<'_>, study_id: &str, site_id: &str) -> SiteActivatedEvent {
        SiteActivatedEvent::new(ctx.ids, ctx.now, study_id, site_id)
    }
}

impl SupplyAgent for CroInterfaceAgent {
    fn state(&self) -> &AgentState {
        &self.state
    }
}
