//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict, PyList).
//! Instants cross the boundary as RFC 3339 strings.

use chrono::{DateTime, Utc};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::decisions::ShippingTariff;
use crate::models::{Metrics, SiteDescriptor, TimelineEvent};
use crate::orchestrator::{AgentRegimeConfig, HumanRegimeConfig, RunResult, ScenarioConfig};

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

/// Extract an optional field from a Python dict.
///
/// Returns an error only if type conversion fails (not if the field is
/// missing or `None`).
fn extract_optional<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<Option<T>>
where
    T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) if !value.is_none() => Ok(Some(value.extract()?)),
        _ => Ok(None),
    }
}

/// Overwrite `target` with the dict value when present
fn override_with<'py, T>(dict: &Bound<'py, PyDict>, key: &str, target: &mut T) -> PyResult<()>
where
    T: FromPyObject<'py>,
{
    if let Some(value) = extract_optional(dict, key)? {
        *target = value;
    }
    Ok(())
}

fn sub_dict<'py>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<Option<Bound<'py, PyDict>>> {
    match dict.get_item(key)? {
        Some(value) if !value.is_none() => Ok(Some(value.downcast_into()?)),
        _ => Ok(None),
    }
}

fn parse_instant(text: &str) -> PyResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| PyValueError::new_err(format!("Invalid RFC 3339 instant '{}': {}", text, e)))
}

// ========================================================================
// Configuration Parsers
// ========================================================================

/// Convert an optional Python dict to a ScenarioConfig
///
/// Missing keys keep their defaults. Range checks are left to the regime
/// constructors.
pub fn parse_scenario_config(py_config: Option<&Bound<'_, PyDict>>) -> PyResult<ScenarioConfig> {
    let mut config = ScenarioConfig::default();
    let Some(dict) = py_config else {
        return Ok(config);
    };

    override_with(dict, "seed", &mut config.seed)?;
    override_with(dict, "study_id", &mut config.study_id)?;

    if let Some(start) = extract_optional::<String>(dict, "start")? {
        config.start = Some(parse_instant(&start)?);
    }
    if let Some(site) = sub_dict(dict, "site")? {
        parse_site(&site, &mut config.site)?;
    }
    if let Some(human) = sub_dict(dict, "human")? {
        parse_human_config(&human, &mut config.human)?;
    }
    if let Some(agent) = sub_dict(dict, "agent")? {
        parse_agent_config(&agent, &mut config.agent)?;
    }

    Ok(config)
}

fn parse_site(py_site: &Bound<'_, PyDict>, site: &mut SiteDescriptor) -> PyResult<()> {
    override_with(py_site, "site_id", &mut site.site_id)?;
    override_with(py_site, "name", &mut site.name)?;
    override_with(py_site, "region", &mut site.region)?;
    Ok(())
}

fn parse_human_config(py_human: &Bound<'_, PyDict>, human: &mut HumanRegimeConfig) -> PyResult<()> {
    override_with(py_human, "cro_review_delay_hours", &mut human.cro_review_delay_hours)?;
    override_with(py_human, "wms_queue_delay_hours", &mut human.wms_queue_delay_hours)?;
    override_with(py_human, "mesqa_queue_delay_hours", &mut human.mesqa_queue_delay_hours)?;
    human.ticket_queue_delay_hours = extract_optional(py_human, "ticket_queue_delay_hours")?;
    override_with(py_human, "system_lookup_delay_hours", &mut human.system_lookup_delay_hours)?;
    override_with(py_human, "logistics_roundtrip_hours", &mut human.logistics_roundtrip_hours)?;
    override_with(py_human, "logistics_rounds", &mut human.logistics_rounds)?;
    override_with(
        py_human,
        "email_clarification_delay_hours",
        &mut human.email_clarification_delay_hours,
    )?;
    Ok(())
}

fn parse_agent_config(py_agent: &Bound<'_, PyDict>, agent: &mut AgentRegimeConfig) -> PyResult<()> {
    override_with(py_agent, "initial_quantity", &mut agent.initial_quantity)?;
    override_with(py_agent, "forecast_horizon_days", &mut agent.forecast_horizon_days)?;
    override_with(py_agent, "accuracy_horizon_days", &mut agent.accuracy_horizon_days)?;
    override_with(py_agent, "release_lead_days", &mut agent.release_lead_days)?;
    override_with(py_agent, "target_delivery_days", &mut agent.target_delivery_days)?;
    if let Some(tariff) = sub_dict(py_agent, "tariff")? {
        parse_tariff(&tariff, &mut agent.tariff)?;
    }
    Ok(())
}

fn parse_tariff(py_tariff: &Bound<'_, PyDict>, tariff: &mut ShippingTariff) -> PyResult<()> {
    override_with(py_tariff, "base", &mut tariff.base)?;
    override_with(py_tariff, "per_batch", &mut tariff.per_batch)?;
    override_with(py_tariff, "expedite_surcharge", &mut tariff.expedite_surcharge)?;
    override_with(py_tariff, "expedite_threshold_days", &mut tariff.expedite_threshold_days)?;
    Ok(())
}

// ========================================================================
// Result Converters
// ========================================================================

/// Convert a TimelineEvent to a Python dict
///
/// Keys: `t`, `protocol`, `channel`, `actor`, `target`, `action`, `details`.
pub fn timeline_event_to_py<'py>(py: Python<'py>, event: &TimelineEvent) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("t", event.timestamp.to_rfc3339())?;
    dict.set_item("protocol", event.protocol.map(|p| p.as_str()))?;
    dict.set_item("channel", event.channel.as_str())?;
    dict.set_item("actor", &event.actor)?;
    dict.set_item("target", event.target.as_deref())?;
    dict.set_item("action", &event.action)?;
    dict.set_item("details", &event.details)?;
    Ok(dict)
}

pub fn metrics_to_py<'py>(py: Python<'py>, metrics: &Metrics) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    for (name, value) in metrics.named_values() {
        dict.set_item(name, value)?;
    }
    Ok(dict)
}

/// Convert a RunResult to `{"regime", "seed", "timeline", "metrics"}`
pub fn run_result_to_py<'py>(py: Python<'py>, result: &RunResult) -> PyResult<Bound<'py, PyDict>> {
    let timeline = PyList::empty_bound(py);
    for event in &result.timeline {
        timeline.append(timeline_event_to_py(py, event)?)?;
    }

    let dict = PyDict::new_bound(py);
    dict.set_item("regime", result.regime.to_string())?;
    dict.set_item("seed", result.seed)?;
    dict.set_item("site_id", &result.site.site_id)?;
    dict.set_item("timeline", timeline)?;
    dict.set_item("metrics", metrics_to_py(py, &result.metrics)?)?;
    Ok(dict)
}
