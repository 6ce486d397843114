//! Domain models for the trial supply simulator

pub mod agent;
pub mod batch;
pub mod enrollment;
pub mod event;
pub mod messages;
pub mod metrics;
pub mod site;

// Re-exports
pub use agent::{AgentState, PendingOrder, ShipmentRecord};
pub use batch::{Batch, ComplianceRules, DepotInventory, ErpInventory};
pub use enrollment::EnrollmentData;
pub use event::{Channel, MessageBus, Protocol, TimelineEvent};
pub use messages::{
    AllocateLotRequest, AllocateLotResponse, CreateShipmentRequest, ShipmentPlan, SiteActivatedEvent,
};
pub use metrics::Metrics;
pub use site::{us_trial_sites, SiteDescriptor, TrialSite};
