use std::collections::BTreeMap;

use indexmap::IndexMap;
use santa_core::errors::{ErrorInfo, SantaError};
use santa_core::{Participant, Roster};
use santa_graph::ConstraintGraph;
use serde::{Deserialize, Serialize};

/// Mapping from each giver to the ordered list of people they give to.
///
/// Givers keep the roster order they were drawn in, so serialized output
/// reads in the same order as the input list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Assignment {
    givees: IndexMap<Participant, Vec<Participant>>,
}

impl Assignment {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            givees: IndexMap::with_capacity(capacity),
        }
    }

    pub(crate) fn insert(&mut self, giver: Participant, givees: Vec<Participant>) {
        self.givees.insert(giver, givees);
    }

    /// Returns the givees assigned to `giver`.
    pub fn givees_of(&self, giver: &str) -> Option<&[Participant]> {
        self.givees.get(giver).map(Vec::as_slice)
    }

    /// Returns whether `giver` gives to `givee`.
    pub fn gives_to(&self, giver: &str, givee: &str) -> bool {
        self.givees_of(giver)
            .map(|givees| givees.iter().any(|p| p.as_str() == givee))
            .unwrap_or(false)
    }

    /// Iterates over givers and their givees in draw order.
    pub fn iter(&self) -> impl Iterator<Item = (&Participant, &[Participant])> + '_ {
        self.givees
            .iter()
            .map(|(giver, givees)| (giver, givees.as_slice()))
    }

    /// Number of givers.
    pub fn len(&self) -> usize {
        self.givees.len()
    }

    /// Returns whether no giver has been recorded.
    pub fn is_empty(&self) -> bool {
        self.givees.is_empty()
    }

    /// Counts how many gifts each participant receives.
    pub fn received_counts(&self) -> BTreeMap<&Participant, usize> {
        let mut counts = BTreeMap::new();
        for givee in self.givees.values().flatten() {
            *counts.entry(givee).or_insert(0) += 1;
        }
        counts
    }

    /// Consumes the assignment and returns the underlying map.
    pub fn into_inner(self) -> IndexMap<Participant, Vec<Participant>> {
        self.givees
    }

    /// Checks every assignment invariant against the exchange inputs.
    ///
    /// The engine satisfies these by construction. This is for assignments
    /// that come from elsewhere, such as a file handed back to the CLI.
    pub fn validate(
        &self,
        roster: &Roster,
        gifts: usize,
        constraints: &ConstraintGraph,
    ) -> Result<(), SantaError> {
        for giver in roster {
            if !self.givees.contains_key(giver) {
                return Err(violation("missing-giver", "participant gives no gifts")
                    .with_context("giver", giver.as_str()));
            }
        }
        for (giver, givees) in &self.givees {
            if !roster.contains(giver.as_str()) {
                return Err(violation("unexpected-giver", "giver is not on the roster")
                    .with_context("giver", giver.as_str()));
            }
            if givees.len() != gifts {
                return Err(violation("wrong-gift-count", "giver has the wrong number of givees")
                    .with_context("giver", giver.as_str())
                    .with_context("expected", gifts.to_string())
                    .with_context("actual", givees.len().to_string()));
            }
            for (index, givee) in givees.iter().enumerate() {
                let pair = |error: SantaError| {
                    error
                        .with_context("giver", giver.as_str())
                        .with_context("givee", givee.as_str())
                };
                if !roster.contains(givee.as_str()) {
                    return Err(pair(violation("unknown-givee", "givee is not on the roster")));
                }
                if givee == giver {
                    return Err(pair(violation("self-gift", "participant gives to themselves")));
                }
                if givees[..index].contains(givee) {
                    return Err(pair(violation("duplicate-givee", "givee listed twice for one giver")));
                }
                if constraints.forbidden(giver, givee) {
                    return Err(pair(violation("forbidden-pairing", "pairing is excluded")));
                }
            }
        }
        let counts = self.received_counts();
        for participant in roster {
            let received = counts.get(participant).copied().unwrap_or(0);
            if received != gifts {
                return Err(violation(
                    "receive-count-mismatch",
                    "participant receives the wrong number of gifts",
                )
                .with_context("givee", participant.as_str())
                .with_context("expected", gifts.to_string())
                .with_context("actual", received.to_string()));
            }
        }
        Ok(())
    }
}

fn violation(code: &str, message: &str) -> SantaError {
    SantaError::Assignment(ErrorInfo::new(code, message))
}
