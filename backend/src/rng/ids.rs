//! Reproducible message identifiers
//!
//! Agent messages carry UUIDs for correlation. They are drawn from their own
//! xorshift stream so that generating ids never shifts the draw order of the
//! reference data generator.

use uuid::{Builder, Uuid};

use super::RngManager;

/// Mixed into the scenario seed so the id stream differs from the data stream.
const ID_STREAM_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Generates version-4 formatted UUIDs from a seeded stream
#[derive(Debug, Clone)]
pub struct IdGenerator {
    rng: RngManager,
}

impl IdGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: RngManager::new(seed ^ ID_STREAM_SALT),
        }
    }

    /// Next message identifier
    pub fn next_uuid(&mut self) -> Uuid {
        Builder::from_random_bytes(self.rng.next_bytes16()).into_uuid()
    }

    /// Short identifier: the first 8 hex characters of a fresh UUID
    pub fn next_short(&mut self) -> String {
        let mut id = self.next_uuid().to_string();
        id.truncate(8);
        id
    }
}
