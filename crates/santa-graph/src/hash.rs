use sha2::{Digest, Sha256};

use crate::constraints::ConstraintGraph;

/// Computes the canonical hash of the forbidden pair relation.
///
/// Two relations with the same symmetric closure hash identically regardless
/// of the order or direction in which their pairs were supplied.
pub fn canonical_hash(graph: &ConstraintGraph) -> String {
    let mut hasher = Sha256::new();
    let version = graph.schema_version();
    hasher.update(version.major.to_le_bytes());
    hasher.update(version.minor.to_le_bytes());
    hasher.update(version.patch.to_le_bytes());

    let pairs = graph.pairs();
    hasher.update((pairs.len() as u64).to_le_bytes());
    for (a, b) in &pairs {
        update_name(a.as_str(), &mut hasher);
        update_name(b.as_str(), &mut hasher);
    }

    format!("{:x}", hasher.finalize())
}

fn update_name(name: &str, hasher: &mut Sha256) {
    hasher.update((name.len() as u64).to_le_bytes());
    hasher.update(name.as_bytes());
}
