//! Python bindings (feature `pyo3`)
//!
//! Two free functions, one per regime. Configuration comes in as a plain
//! dict; results go out as dicts and lists of builtin types only.

pub mod regimes;
pub mod types;
