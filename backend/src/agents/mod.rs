//! Autonomous agent roles
//!
//! Four roles cooperate to activate a site:
//! - **CRO Interface**: reads CTMS, announces site activation
//! - **Clinical Ops**: coordinates; sends allocation and shipment requests
//! - **Manufacturing (MES)**: allocates batches, earliest expiry first
//! - **Logistics**: plans and prices the shipment
//!
//! Messages are direct synchronous calls: a send is handled by the receiver
//! before control returns, like a request/response RPC. Agents hold only their
//! own named state; the bus, the capability provider and the id stream are
//! lent to them per call through an [`AgentContext`].

pub mod clinical_ops;
pub mod interface;
pub mod logistics;
pub mod manufacturing;

use chrono::{DateTime, Utc};

use crate::models::{AgentState, MessageBus};
use crate::rng::IdGenerator;
use crate::systems::{Caller, MockSystems};

pub use clinical_ops::ClinicalOpsAgent;
pub use interface::CroInterfaceAgent;
pub use logistics::LogisticsAgent;
pub use manufacturing::ManufacturingAgent;

pub const CRO_INTERFACE_AGENT: &str = "CRO Interface Agent";
pub const CLINICAL_OPS_AGENT: &str = "Clinical Ops Agent";
pub const MES_AGENT: &str = "MES Agent";
pub const LOGISTICS_AGENT: &str = "Logistics Agent";

/// Run-owned resources lent to an agent for one call
pub struct AgentContext<'a> {
    pub bus: &'a mut MessageBus,
    pub systems: &'a mut MockSystems,
    pub ids: &'a mut IdGenerator,
    pub now: DateTime<Utc>,
}

impl<'a> AgentContext<'a> {
    pub fn new(
        bus: &'a mut MessageBus,
        systems: &'a mut MockSystems,
        ids: &'a mut IdGenerator,
        now: DateTime<Utc>,
    ) -> Self {
        Self { bus, systems, ids, now }
    }
}

/// Capabilities shared by every agent role
pub trait SupplyAgent {
    fn state(&self) -> &AgentState;

    fn name(&self) -> &str {
        &self.state().name
    }

    /// Attribution for a system query made by this agent at `at`
    fn caller(&self, at: DateTime<Utc>) -> Caller<'_> {
        Caller::new(self.name(), at)
    }
}
