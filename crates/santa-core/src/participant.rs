use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, SantaError};

/// Opaque identifier for someone taking part in the exchange.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Participant(String);

impl Participant {
    /// Returns the name backing the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identifier and returns the name.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Participant {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Participant {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for Participant {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Ordered list of distinct participants.
///
/// The order is the one supplied by the caller and doubles as the giver order
/// used by the engine, which keeps a seeded draw reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Roster {
    members: Vec<Participant>,
}

impl Roster {
    /// Builds a roster, rejecting blank names and duplicates.
    pub fn new<I, P>(members: I) -> Result<Self, SantaError>
    where
        I: IntoIterator<Item = P>,
        P: Into<Participant>,
    {
        let members: Vec<Participant> = members.into_iter().map(Into::into).collect();
        let mut seen = BTreeSet::new();
        for (index, member) in members.iter().enumerate() {
            if member.as_str().trim().is_empty() {
                return Err(SantaError::Roster(
                    ErrorInfo::new("empty-participant", "participant names must not be blank")
                        .with_context("index", index.to_string()),
                ));
            }
            if !seen.insert(member.as_str()) {
                return Err(SantaError::Roster(
                    ErrorInfo::new("duplicate-participant", "participant listed more than once")
                        .with_context("participant", member.as_str())
                        .with_context("index", index.to_string()),
                ));
            }
        }
        Ok(Self { members })
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns whether the roster has no participants.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns whether `name` is on the roster.
    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|member| member.as_str() == name)
    }

    /// Iterates over the participants in roster order.
    pub fn iter(&self) -> std::slice::Iter<'_, Participant> {
        self.members.iter()
    }

    /// Returns the participants as a slice.
    pub fn as_slice(&self) -> &[Participant] {
        &self.members
    }

    /// Checks that every participant can be given `gifts` distinct givees.
    pub fn check_capacity(&self, gifts: usize) -> Result<(), SantaError> {
        if gifts == 0 {
            return Err(SantaError::invalid_gift_count(gifts));
        }
        if self.members.len() <= gifts {
            return Err(SantaError::insufficient_participants(
                self.members.len(),
                gifts,
            ));
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Participant;
    type IntoIter = std::slice::Iter<'a, Participant>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl<'de> Deserialize<'de> for Roster {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let members = Vec::<Participant>::deserialize(deserializer)?;
        Roster::new(members).map_err(serde::de::Error::custom)
    }
}
