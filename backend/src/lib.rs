//! Trial Supply Simulator Core - Rust Engine
//!
//! Deterministic simulation of clinical-trial supply coordination for one
//! site activation, run under two regimes: a human-driven one (emails,
//! tickets, manual lookups) and an agent-driven one (structured system
//! queries and agent-to-agent messages).
//!
//! # Architecture
//!
//! - **core**: Logical clock
//! - **rng**: Deterministic random numbers and message ids
//! - **models**: Domain types (batches, messages, timeline events, metrics)
//! - **reference**: Seeded reference batch data
//! - **systems**: Mock enterprise systems (CTMS, ERP, WMS, LIMS, compliance)
//! - **decisions**: Allocation and shipping rules
//! - **agents**: The four agent roles of the agent regime
//! - **orchestrator**: Scenario config and the two regime scripts
//! - **analysis**: Timeline tables, statistics and regime comparison
//!
//! # Critical Invariants
//!
//! 1. All randomness is deterministic (seeded RNG, seeded ids)
//! 2. The engine never reads the wall clock; runs take an explicit start
//! 3. Timelines are append-only and chronological
//! 4. FFI boundary is minimal and safe

// Module declarations
pub mod agents;
pub mod analysis;
pub mod core;
pub mod decisions;
pub mod models;
pub mod orchestrator;
pub mod reference;
pub mod rng;
pub mod systems;

// Re-exports for convenience
pub use analysis::{timeline_table, RegimeComparison, SupplyRisk, TimelineRow, TimelineStats};
pub use core::time::SimClock;
pub use decisions::{allocate_fifo_by_expiry, Allocation, ShipmentQuote, ShippingTariff};
pub use models::{
    Batch, Channel, EnrollmentData, MessageBus, Metrics, Protocol, SiteDescriptor, TimelineEvent,
};
pub use orchestrator::{
    run_agent_regime, run_human_regime, AgentRegime, AgentRegimeConfig, AgentRunResult, HumanRegime,
    HumanRegimeConfig, Regime, RunResult, ScenarioConfig, SimulationError,
};
pub use rng::{IdGenerator, RngManager};
pub use systems::MockSystems;

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn trial_supply_sim_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::regimes::run_human, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::regimes::run_agents, m)?)?;
    Ok(())
}
