//! Regime entry points exposed to Python
//!
//! ```python
//! from trial_supply_sim_core_rs import run_human, run_agents
//!
//! before = run_human({"seed": 42, "start": "2025-03-03T09:00:00Z"})
//! after = run_agents({"seed": 42, "start": "2025-03-03T09:00:00Z"})
//! print(before["metrics"]["order_to_delivery_days"], len(after["timeline"]))
//! ```

use chrono::Utc;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use super::types::{parse_scenario_config, run_result_to_py};
use crate::orchestrator::{run_agent_regime, run_human_regime, SimulationError};

fn to_py_err(err: SimulationError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Run the human-driven regime
///
/// Raises ValueError for an invalid configuration.
#[pyfunction]
#[pyo3(signature = (config=None))]
pub fn run_human(py: Python<'_>, config: Option<&Bound<'_, PyDict>>) -> PyResult<Py<PyDict>> {
    let scenario = parse_scenario_config(config)?;
    let start = scenario.start_or(Utc::now());
    let result = run_human_regime(&scenario, start).map_err(to_py_err)?;
    Ok(run_result_to_py(py, &result)?.unbind())
}

/// Run the agent-driven regime
///
/// Besides `timeline` and `metrics`, the dict carries `allocated_batches`,
/// `constraints` and `shipment_id`.
#[pyfunction]
#[pyo3(signature = (config=None))]
pub fn run_agents(py: Python<'_>, config: Option<&Bound<'_, PyDict>>) -> PyResult<Py<PyDict>> {
    let scenario = parse_scenario_config(config)?;
    let start = scenario.start_or(Utc::now());
    let result = run_agent_regime(&scenario, start).map_err(to_py_err)?;

    let dict = run_result_to_py(py, &result.run)?;
    dict.set_item("allocated_batches", PyList::new_bound(py, &result.allocation.batch_ids))?;
    dict.set_item("constraints", PyList::new_bound(py, &result.allocation.constraints))?;
    dict.set_item("shipment_id", &result.shipment.shipment_id)?;
    dict.set_item("expedited", result.shipment.expedited)?;
    Ok(dict.unbind())
}
