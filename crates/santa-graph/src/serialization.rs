use santa_core::errors::{ErrorInfo, SantaError};
use santa_core::provenance::SchemaVersion;
use serde::{Deserialize, Serialize};

use crate::constraints::ConstraintGraph;

/// Serializes the relation to a compact binary representation using `bincode`.
pub fn graph_to_bytes(graph: &ConstraintGraph) -> Result<Vec<u8>, SantaError> {
    let serializable = SerializableConstraints::from_graph(graph);
    bincode::serialize(&serializable)
        .map_err(|err| SantaError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a relation from its binary representation.
pub fn graph_from_bytes(bytes: &[u8]) -> Result<ConstraintGraph, SantaError> {
    let serializable: SerializableConstraints = bincode::deserialize(bytes)
        .map_err(|err| SantaError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    Ok(serializable.into_graph())
}

/// Serializes the relation to a JSON string.
pub fn graph_to_json(graph: &ConstraintGraph) -> Result<String, SantaError> {
    let serializable = SerializableConstraints::from_graph(graph);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| SantaError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a relation from a JSON string.
pub fn graph_from_json(json: &str) -> Result<ConstraintGraph, SantaError> {
    let serializable: SerializableConstraints = serde_json::from_str(json)
        .map_err(|err| SantaError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    Ok(serializable.into_graph())
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableConstraints {
    schema_version: SchemaVersion,
    pairs: Vec<(String, String)>,
}

impl SerializableConstraints {
    fn from_graph(graph: &ConstraintGraph) -> Self {
        Self {
            schema_version: graph.schema_version(),
            pairs: graph
                .pairs()
                .into_iter()
                .map(|(a, b)| (a.into_inner(), b.into_inner()))
                .collect(),
        }
    }

    fn into_graph(self) -> ConstraintGraph {
        ConstraintGraph::build(self.pairs).with_schema_version(self.schema_version)
    }
}
