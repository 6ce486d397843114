//! Orchestrator - scenario setup and the two regime scripts
//!
//! Both regimes are built from the same [`ScenarioConfig`] and start instant,
//! each with its own bus, capability provider and clock. They never share
//! state, so they may run on separate threads; results are only compared
//! after the fact.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use trial_supply_sim_core_rs::orchestrator::{run_agent_regime, run_human_regime, ScenarioConfig};
//!
//! let scenario = ScenarioConfig::default();
//! let start = Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap();
//!
//! let human = run_human_regime(&scenario, start).unwrap();
//! let agent = run_agent_regime(&scenario, start).unwrap();
//!
//! assert_eq!(human.metrics.latency_hours, Some(235.0));
//! assert!(agent.run.metrics.order_to_delivery_days < human.metrics.order_to_delivery_days);
//! ```

pub mod agentic;
pub mod config;
pub mod error;
pub mod human;
pub mod result;

use chrono::{DateTime, Utc};

pub use agentic::AgentRegime;
pub use config::{AgentRegimeConfig, HumanRegimeConfig, ScenarioConfig, DEFAULT_SEED, DEFAULT_STUDY_ID};
pub use error::SimulationError;
pub use human::HumanRegime;
pub use result::{AgentRunResult, Regime, RunResult};

/// Validate and run the human-driven script
pub fn run_human_regime(scenario: &ScenarioConfig, start: DateTime<Utc>) -> Result<RunResult, SimulationError> {
    Ok(HumanRegime::new(scenario, start)?.run())
}

/// Validate and run the agent-driven activation
pub fn run_agent_regime(scenario: &ScenarioConfig, start: DateTime<Utc>) -> Result<AgentRunResult, SimulationError> {
    Ok(AgentRegime::new(scenario, start)?.run())
}
