//! Capability provider: mock stand-ins for external IT systems
//!
//! `MockSystems` answers the queries agents (and humans) would otherwise send
//! to CTMS, LIMS, WMS, ERP and the compliance rule base. Every query both
//! returns a value and appends exactly one system-to-system event to the bus
//! it is handed, attributed to the caller.
//!
//! The provider is the single source of truth for batch quantities within a
//! run. It is never shared between runs: allocation mutates it.
//!
//! None of the queries fail. Unknown inputs fall back to default answers (an
//! unknown batch is simply not valid), because the systems being modelled are
//! always available.

use chrono::{DateTime, Utc};

use crate::models::{
    us_trial_sites, Batch, ComplianceRules, DepotInventory, EnrollmentData, ErpInventory, MessageBus,
    TimelineEvent, TrialSite,
};
use crate::reference::generate_batches;
use crate::rng::RngManager;

pub const DEFAULT_DEPOT_ID: &str = "US-DEPOT-1";
pub const DEFAULT_COUNTRY: &str = "United States";

/// Who is asking, and at what logical time
#[derive(Debug, Clone, Copy)]
pub struct Caller<'a> {
    pub actor: &'a str,
    pub at: DateTime<Utc>,
}

impl<'a> Caller<'a> {
    pub fn new(actor: &'a str, at: DateTime<Utc>) -> Self {
        Self { actor, at }
    }
}

/// Mock external systems for one run
#[derive(Debug, Clone)]
pub struct MockSystems {
    depot_id: String,
    country: String,
    batches: Vec<Batch>,
    rng: RngManager,
}

impl MockSystems {
    /// Create the provider, generating the batch pool from `seed`
    ///
    /// The same generator then supplies forecast noise, so for a fixed seed
    /// every query sequence is reproducible.
    pub fn new(seed: u64, run_start: DateTime<Utc>) -> Self {
        let mut rng = RngManager::new(seed);
        let batches = generate_batches(&mut rng, run_start);
        Self::with_batches(batches, rng)
    }

    /// Create the provider over an explicit batch pool
    pub fn with_batches(batches: Vec<Batch>, rng: RngManager) -> Self {
        Self {
            depot_id: DEFAULT_DEPOT_ID.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            batches,
            rng,
        }
    }

    // ------------------------------------------------------------------
    // CTMS
    // ------------------------------------------------------------------

    pub fn get_trial_sites(&self, bus: &mut MessageBus, caller: Caller<'_>) -> Vec<TrialSite> {
        let sites = us_trial_sites();
        bus.log(TimelineEvent::mcp(
            caller.at,
            caller.actor,
            "CTMS",
            "get_trial_sites",
            format!("Returned {} US sites", sites.len()),
        ));
        sites
    }

    /// Daily forecast over `days`: `max(0, floor(1 + i/10 + noise))` with
    /// noise uniform in [0, 1.5). One event regardless of horizon length.
    pub fn get_enrollment_data(
        &mut self,
        bus: &mut MessageBus,
        caller: Caller<'_>,
        study_id: &str,
        site_id: &str,
        days: usize,
    ) -> EnrollmentData {
        let forecast: Vec<u32> = (0..days)
            .map(|i| {
                let expected = 1.0 + i as f64 / 10.0 + self.rng.next_f64() * 1.5;
                expected.max(0.0).floor() as u32
            })
            .collect();

        bus.log(TimelineEvent::mcp(
            caller.at,
            caller.actor,
            "CTMS",
            "get_enrollment_data",
            format!("{} {}-day forecast generated", site_id, days),
        ));
        EnrollmentData::from_daily(study_id, site_id, forecast)
    }

    // ------------------------------------------------------------------
    // LIMS
    // ------------------------------------------------------------------

    /// Live view of the batch pool (reflects earlier allocations in the run)
    pub fn get_batch_stability(&self, bus: &mut MessageBus, caller: Caller<'_>) -> &[Batch] {
        bus.log(TimelineEvent::mcp(
            caller.at,
            caller.actor,
            "LIMS",
            "get_batch_stability",
            format!("Fetched {} batches", self.batches.len()),
        ));
        &self.batches
    }

    /// True iff the batch exists and expires strictly after `on_date`
    pub fn check_batch_expiry(
        &self,
        bus: &mut MessageBus,
        caller: Caller<'_>,
        batch_id: &str,
        on_date: DateTime<Utc>,
    ) -> bool {
        let valid = self
            .find_batch(batch_id)
            .is_some_and(|batch| batch.is_valid_on(on_date));

        bus.log(TimelineEvent::mcp(
            caller.at,
            caller.actor,
            "LIMS",
            "check_batch_expiry",
            format!("{} valid_on {} -> {}", batch_id, on_date.date_naive(), valid),
        ));
        valid
    }

    // ------------------------------------------------------------------
    // WMS / Compliance
    // ------------------------------------------------------------------

    pub fn get_depot_inventory(&self, bus: &mut MessageBus, caller: Caller<'_>) -> DepotInventory {
        bus.log(TimelineEvent::mcp(
            caller.at,
            caller.actor,
            "WMS",
            "get_depot_inventory",
            format!("Depot {} with {} batches", self.depot_id, self.batches.len()),
        ));
        DepotInventory {
            depot_id: self.depot_id.clone(),
            country: self.country.clone(),
            batches: self.batches.clone(),
        }
    }

    /// Fixed rule set; the same for every site
    pub fn check_compliance_rules(&self, bus: &mut MessageBus, caller: Caller<'_>, site_id: &str) -> ComplianceRules {
        bus.log(TimelineEvent::mcp(
            caller.at,
            caller.actor,
            "Compliance",
            "check_compliance_rules",
            format!("Checked rules for {}", site_id),
        ));
        [("temperature", "2-8C"), ("serialization", "DSCSA"), ("country", "US")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    // ------------------------------------------------------------------
    // ERP
    // ------------------------------------------------------------------

    /// Totals recomputed from current batch state on every call
    pub fn get_erp_inventory(&self, bus: &mut MessageBus, caller: Caller<'_>) -> ErpInventory {
        let total_units = self.total_units();
        bus.log(TimelineEvent::mcp(
            caller.at,
            caller.actor,
            "ERP",
            "get_erp_inventory",
            format!("Total units available: {}", total_units),
        ));
        ErpInventory {
            total_units,
            batch_count: self.batches.len(),
        }
    }

    // ------------------------------------------------------------------
    // Direct access (no event logged)
    // ------------------------------------------------------------------

    /// Sum of every batch's remaining units
    pub fn total_units(&self) -> u64 {
        self.batches.iter().map(|b| u64::from(b.available_units)).sum()
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    /// Mutable pool, for the component performing an allocation
    pub fn batches_mut(&mut self) -> &mut [Batch] {
        &mut self.batches
    }

    pub fn find_batch(&self, batch_id: &str) -> Option<&Batch> {
        self.batches.iter().find(|b| b.batch_id == batch_id)
    }
}
