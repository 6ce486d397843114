//! Decision logic performed by actors when they receive a request
//!
//! - **allocation**: reserve batch quantities, earliest expiry first
//! - **shipping**: lead time, expedite and cost of a planned shipment
//!
//! Both are pure functions over data handed to them, so the regimes can
//! wrap them with whatever logging and messaging they need.

pub mod allocation;
pub mod shipping;

pub use allocation::{allocate_fifo_by_expiry, shortfall_note, Allocation};
pub use shipping::{lead_days, negotiated_shipment_cost, ShipmentQuote, ShippingTariff};
