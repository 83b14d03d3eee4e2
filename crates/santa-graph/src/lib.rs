#![deny(missing_docs)]

//! Symmetric forbidden-pair relation consumed by the assignment engine.

mod constraints;
mod hash;
mod serialization;

pub use constraints::ConstraintGraph;
pub use hash::canonical_hash;

/// Re-export serialization helpers for downstream crates.
pub use serialization::{graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json};
