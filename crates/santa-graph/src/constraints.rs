use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};

use santa_core::provenance::SchemaVersion;
use santa_core::Participant;

/// Symmetric relation of participant pairs that must not be matched.
///
/// Every inserted pair is stored in both directions, so the relation is the
/// symmetric closure of whatever the caller supplied. There is no way to add
/// a pair after construction other than the consuming builders below.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintGraph {
    adjacency: BTreeMap<Participant, BTreeSet<Participant>>,
    schema_version: SchemaVersion,
}

impl ConstraintGraph {
    /// Returns a relation where nothing is forbidden.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the symmetric closure of the provided pairs.
    pub fn build<I, A, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<Participant>,
        B: Into<Participant>,
    {
        let mut graph = Self::empty();
        for (a, b) in pairs {
            graph.insert_pair(a.into(), b.into());
        }
        graph
    }

    /// Forbids `giver` from being matched with any of the givees it had in a
    /// previous round.
    pub fn with_history<G, I, P>(mut self, giver: G, givees: I) -> Self
    where
        G: Into<Participant>,
        I: IntoIterator<Item = P>,
        P: Into<Participant>,
    {
        let giver = giver.into();
        for givee in givees {
            self.insert_pair(giver.clone(), givee.into());
        }
        self
    }

    /// Merges a whole prior assignment, giver to givees, into the relation.
    pub fn with_assignment_history<'a, I, G>(self, history: I) -> Self
    where
        I: IntoIterator<Item = (&'a Participant, G)>,
        G: IntoIterator<Item = &'a Participant>,
    {
        history.into_iter().fold(self, |graph, (giver, givees)| {
            graph.with_history(giver.clone(), givees.into_iter().cloned())
        })
    }

    /// Returns the union of both relations.
    pub fn merge(mut self, other: &ConstraintGraph) -> Self {
        for (a, b) in other.pairs() {
            self.insert_pair(a, b);
        }
        self
    }

    /// Returns whether a gift between `a` and `b`, in either direction, is disallowed.
    pub fn forbidden<Q>(&self, a: &Q, b: &Q) -> bool
    where
        Participant: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.adjacency
            .get(a)
            .map(|excluded| excluded.contains(b))
            .unwrap_or(false)
    }

    /// Returns everybody `participant` must not be matched with.
    pub fn exclusions_for<Q>(&self, participant: &Q) -> impl Iterator<Item = &Participant> + '_
    where
        Participant: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.adjacency
            .get(participant)
            .into_iter()
            .flat_map(|excluded| excluded.iter())
    }

    /// Number of distinct unordered pairs in the relation.
    pub fn pair_count(&self) -> usize {
        self.pairs().len()
    }

    /// Returns whether nothing is forbidden.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Returns each unordered pair once, smaller name first, in sorted order.
    pub fn pairs(&self) -> Vec<(Participant, Participant)> {
        let mut pairs = Vec::new();
        for (a, excluded) in &self.adjacency {
            for b in excluded.range(a.clone()..) {
                pairs.push((a.clone(), b.clone()));
            }
        }
        pairs
    }

    /// Schema version stored alongside serialized payloads.
    pub fn schema_version(&self) -> SchemaVersion {
        self.schema_version
    }

    pub(crate) fn with_schema_version(mut self, schema_version: SchemaVersion) -> Self {
        self.schema_version = schema_version;
        self
    }

    fn insert_pair(&mut self, a: Participant, b: Participant) {
        self.adjacency
            .entry(a.clone())
            .or_default()
            .insert(b.clone());
        self.adjacency.entry(b).or_default().insert(a);
    }
}
