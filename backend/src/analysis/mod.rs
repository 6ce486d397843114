//! Post-run analysis of exported timelines and metrics
//!
//! Everything here is a pure function of a finished run's exports; nothing
//! reaches back into a live bus or capability provider.

pub mod compare;
pub mod stats;
pub mod table;

pub use compare::RegimeComparison;
pub use stats::{SupplyRisk, TimelineStats};
pub use table::{format_relative, timeline_table, TimelineRow};
