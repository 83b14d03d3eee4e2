use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use santa_core::errors::{ErrorInfo, SantaError};
use santa_core::Roster;
use santa_graph::ConstraintGraph;
use serde::{Deserialize, Serialize};

/// Caller supplied description of one gift exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// Participants in giver order.
    pub participants: Vec<String>,
    /// Number of gifts each participant gives and receives.
    #[serde(default = "default_gifts")]
    pub gifts: usize,
    /// Pairs that must not be matched in either direction.
    #[serde(default)]
    pub exclusions: Vec<(String, String)>,
    /// Givees from earlier exchanges, keyed by giver; never repeated.
    #[serde(default)]
    pub history: BTreeMap<String, Vec<String>>,
    /// Master seed and label.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
    /// Retry budget for the restart loop.
    #[serde(default)]
    pub retry: RetryPolicy,
    /// Deferral heuristic used inside each attempt.
    #[serde(default)]
    pub deferral: DeferralLimit,
}

fn default_gifts() -> usize {
    1
}

impl ExchangeConfig {
    /// Creates a configuration with defaults for everything but the roster.
    pub fn new<I, S>(participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            participants: participants.into_iter().map(Into::into).collect(),
            gifts: default_gifts(),
            exclusions: Vec::new(),
            history: BTreeMap::new(),
            seed_policy: SeedPolicy::default(),
            retry: RetryPolicy::default(),
            deferral: DeferralLimit::default(),
        }
    }

    /// Parses a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SantaError> {
        serde_yaml::from_str(yaml)
            .map_err(|err| SantaError::Serde(ErrorInfo::new("config-parse", err.to_string())))
    }

    /// Parses a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, SantaError> {
        serde_json::from_str(json)
            .map_err(|err| SantaError::Serde(ErrorInfo::new("config-parse", err.to_string())))
    }

    /// Loads a configuration file; `.json` files are read as JSON, anything else as YAML.
    pub fn load(path: &Path) -> Result<Self, SantaError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            SantaError::Serde(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let parsed = if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_yaml_str(&contents)
        };
        parsed.map_err(|err| err.with_context("path", path.display().to_string()))
    }

    /// Serializes the configuration to YAML.
    pub fn to_yaml(&self) -> Result<String, SantaError> {
        serde_yaml::to_string(self)
            .map_err(|err| SantaError::Serde(ErrorInfo::new("config-serialize", err.to_string())))
    }

    /// Builds the validated roster.
    pub fn roster(&self) -> Result<Roster, SantaError> {
        Roster::new(self.participants.iter().map(String::as_str))
    }

    /// Builds the forbidden pair relation from exclusions and history.
    pub fn constraints(&self) -> ConstraintGraph {
        let exclusions = ConstraintGraph::build(self.exclusions.iter().cloned());
        self.history
            .iter()
            .fold(exclusions, |graph, (giver, givees)| {
                graph.with_history(giver.as_str(), givees.iter().map(String::as_str))
            })
    }

    /// Checks everything that can be checked without drawing.
    pub fn validate(&self) -> Result<Roster, SantaError> {
        let roster = self.roster()?;
        roster.check_capacity(self.gifts)?;
        for (a, b) in &self.exclusions {
            for name in [a, b] {
                ensure_known(&roster, name, "exclusions")?;
            }
        }
        for (giver, givees) in &self.history {
            ensure_known(&roster, giver, "history")?;
            for givee in givees {
                ensure_known(&roster, givee, "history")?;
            }
        }
        self.retry.validate()?;
        Ok(roster)
    }
}

fn ensure_known(roster: &Roster, name: &str, section: &str) -> Result<(), SantaError> {
    if roster.contains(name) {
        return Ok(());
    }
    Err(SantaError::Constraint(
        ErrorInfo::new("unknown-participant", "name is not on the participant list")
            .with_context("participant", name)
            .with_context("section", section)
            .with_hint("check the spelling against the participant list"),
    ))
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed used for the draw.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
    /// Optional label recorded in report provenance.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_master_seed() -> u64 {
    0x05EE_D5A4_7A00_0001_u64
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
            label: None,
        }
    }
}

/// Bounds the number of whole attempts the restart loop may spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Attempts made before giving up with `no-feasible-assignment`.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    /// Times a multi-round plan is redrawn from its first round after a
    /// later round runs out of attempts.
    #[serde(default = "default_max_plan_restarts")]
    pub max_plan_restarts: usize,
}

fn default_max_attempts() -> usize {
    10_000
}

fn default_max_plan_restarts() -> usize {
    32
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            max_plan_restarts: default_max_plan_restarts(),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with the provided budget.
    pub fn with_max_attempts(max_attempts: usize) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }

    /// Rejects a budget that would never run an attempt.
    pub fn validate(&self) -> Result<(), SantaError> {
        if self.max_attempts == 0 {
            return Err(SantaError::Config(
                ErrorInfo::new("invalid-retry-budget", "retry budget must allow at least one attempt")
                    .with_context("max_attempts", "0"),
            ));
        }
        Ok(())
    }
}

/// How many consecutive deferrals a single gift slot may use before the
/// attempt is abandoned.
///
/// This is a heuristic cut-off, not a feasibility proof: it can abandon an
/// attempt that was still solvable, which the restart loop absorbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DeferralLimit {
    /// Give up once deferrals exceed the number of candidates still pooled.
    #[default]
    RemainingPool,
    /// Give up once deferrals exceed a fixed count.
    Fixed {
        /// Deferral count beyond which a rejected candidate ends the attempt.
        max: usize,
    },
}

impl DeferralLimit {
    /// Returns whether a slot that has already deferred `deferrals` times
    /// must stop, given `remaining` candidates besides the one in hand.
    pub fn exceeded(&self, deferrals: usize, remaining: usize) -> bool {
        match self {
            DeferralLimit::RemainingPool => deferrals > remaining,
            DeferralLimit::Fixed { max } => deferrals > *max,
        }
    }
}
