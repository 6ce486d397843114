//! Tabular rendering of a timeline
//!
//! Times are shown relative to the earliest event as `Day {d} {HH}:{MM}`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Channel, TimelineEvent};

/// One rendered timeline row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineRow {
    pub time: String,
    pub actor_from: String,
    pub actor_to: Option<String>,
    pub action: String,
    pub channel: Channel,
}

/// Render `events` as rows, relative to the earliest timestamp
///
/// Empty input yields an empty table.
pub fn timeline_table(events: &[TimelineEvent]) -> Vec<TimelineRow> {
    let Some(t0) = earliest(events) else {
        return Vec::new();
    };

    events
        .iter()
        .map(|event| TimelineRow {
            time: format_relative(event.timestamp - t0),
            actor_from: event.actor.clone(),
            actor_to: event.target.clone(),
            action: event.action.clone(),
            channel: event.channel,
        })
        .collect()
}

/// `Day {d} {HH}:{MM}` for a non-negative offset (seconds truncated)
pub fn format_relative(offset: Duration) -> String {
    let minutes = offset.num_minutes().max(0);
    let days = minutes / (24 * 60);
    let hours = (minutes / 60) % 24;
    let mins = minutes % 60;
    format!("Day {} {:02}:{:02}", days, hours, mins)
}

fn earliest(events: &[TimelineEvent]) -> Option<DateTime<Utc>> {
    events.iter().map(|e| e.timestamp).min()
}
