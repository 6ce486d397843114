//! Deterministic random number generation
//!
//! Uses xorshift64* algorithm for fast, deterministic random number generation.
//! CRITICAL: All randomness in the simulator MUST go through this module.
//! That includes batch quantities, forecast noise and message identifiers.

mod ids;
mod xorshift;

pub use ids::IdGenerator;
pub use xorshift::RngManager;
