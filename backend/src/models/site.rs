//! Trial sites.

use serde::{Deserialize, Serialize};

/// Site taking part in a scenario (identifier, display name, region)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteDescriptor {
    pub site_id: String,
    pub name: String,
    #[serde(default)]
    pub region: String,
}

impl SiteDescriptor {
    pub fn new(site_id: impl Into<String>, name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            name: name.into(),
            region: region.into(),
        }
    }
}

impl Default for SiteDescriptor {
    fn default() -> Self {
        Self::new("US-BOS-001", "Mass General Brigham", "MA")
    }
}

/// Entry in the CTMS site list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialSite {
    pub site_id: String,
    pub name: String,
}

/// Fixed CTMS site list returned by `get_trial_sites`
pub fn us_trial_sites() -> Vec<TrialSite> {
    [
        ("US-001", "Cleveland Clinic"),
        ("US-002", "Mayo Clinic"),
        ("US-003", "Mass General"),
        ("US-004", "UCSF"),
        ("US-005", "MD Anderson"),
    ]
    .into_iter()
    .map(|(site_id, name)| TrialSite {
        site_id: site_id.to_string(),
        name: name.to_string(),
    })
    .collect()
}
