//! Timeline table, statistics and comparison over real runs

use chrono::{DateTime, TimeZone, Utc};
use trial_supply_sim_core_rs::{
    run_agent_regime, run_human_regime, timeline_table, Channel, RegimeComparison, ScenarioConfig, SupplyRisk,
    TimelineStats,
};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap()
}

#[test]
fn test_human_table_times() {
    let result = run_human_regime(&ScenarioConfig::default(), start()).unwrap();
    let rows = timeline_table(&result.timeline);

    assert_eq!(rows.len(), 14);
    assert_eq!(rows[0].time, "Day 0 00:00");
    assert_eq!(rows[1].time, "Day 7 00:00");
    assert_eq!(rows.last().unwrap().time, "Day 9 19:00");
}

#[test]
fn test_human_stats() {
    let result = run_human_regime(&ScenarioConfig::default(), start()).unwrap();
    let stats = TimelineStats::from_events(&result.timeline);

    assert_eq!(stats.detection_delay_days, 7.0);
    assert!((stats.total_response_days - 235.0 / 24.0).abs() < 1e-9);
    assert_eq!(stats.stockout_days, 0.0);
    assert_eq!(stats.patients_affected, 0);
    assert_eq!(stats.risk, SupplyRisk::SupplyCritical);
    assert_eq!(stats.channel_count(Channel::Ticket), 8);
    assert_eq!(stats.channel_count(Channel::Email), 3);
    assert_eq!(stats.channel_count(Channel::System), 2);
    assert_eq!(stats.channel_count(Channel::Manual), 1);
}

#[test]
fn test_agent_stats_are_instant() {
    let result = run_agent_regime(&ScenarioConfig::default(), start()).unwrap();
    let stats = TimelineStats::from_events(&result.run.timeline);

    assert_eq!(stats.total_response_days, 0.0);
    assert_eq!(stats.detection_delay_days, 0.0);
    assert_eq!(stats.risk, SupplyRisk::Nominal);
    assert!(timeline_table(&result.run.timeline).iter().all(|r| r.time == "Day 0 00:00"));
}

#[test]
fn test_comparison_serializes() {
    let human = run_human_regime(&ScenarioConfig::default(), start()).unwrap();
    let agent = run_agent_regime(&ScenarioConfig::default(), start()).unwrap();
    let cmp = RegimeComparison::between(&human, &agent.run);

    let json = serde_json::to_value(&cmp).unwrap();
    assert_eq!(json["human_events"], 14);
    assert_eq!(json["agent_events"], 22);
    assert_eq!(json["agent_stats"]["risk"], "nominal");
}
