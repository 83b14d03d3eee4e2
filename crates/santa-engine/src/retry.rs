use std::collections::BTreeMap;

use rand::Rng;
use santa_core::errors::SantaError;
use santa_core::Roster;
use santa_graph::ConstraintGraph;
use serde::{Deserialize, Serialize};

use crate::assignment::Assignment;
use crate::config::RetryPolicy;
use crate::engine::{AssignmentEngine, AttemptOutcome, InfeasibleSignal};

/// Successful outcome of the restart loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// The accepted assignment.
    pub assignment: Assignment,
    /// Attempts made, including the successful one.
    pub attempts: usize,
    /// Number of abandoned attempts absorbed along the way.
    pub infeasible_attempts: usize,
    /// How often each giver was the one whose slot could not be filled.
    #[serde(default)]
    pub failures_by_giver: BTreeMap<String, usize>,
}

impl AssignmentEngine {
    /// Repeats [`AssignmentEngine::generate`] until an attempt succeeds or the
    /// retry budget is spent.
    ///
    /// The RNG is carried from one attempt to the next, so every retry works
    /// on a fresh shuffle. Roster errors come back on the first call and are
    /// never retried.
    pub fn generate_until_success<R: Rng + ?Sized>(
        &self,
        roster: &Roster,
        gifts: usize,
        constraints: &ConstraintGraph,
        rng: &mut R,
        policy: &RetryPolicy,
    ) -> Result<GenerationReport, SantaError> {
        policy.validate()?;
        roster.check_capacity(gifts)?;

        let mut failures_by_giver: BTreeMap<String, usize> = BTreeMap::new();
        let mut last_failure: Option<InfeasibleSignal> = None;
        for attempt in 1..=policy.max_attempts {
            match self.generate(roster, gifts, constraints, rng)? {
                AttemptOutcome::Assigned(assignment) => {
                    return Ok(GenerationReport {
                        assignment,
                        attempts: attempt,
                        infeasible_attempts: attempt - 1,
                        failures_by_giver,
                    });
                }
                AttemptOutcome::Infeasible(signal) => {
                    *failures_by_giver
                        .entry(signal.giver.as_str().to_owned())
                        .or_insert(0) += 1;
                    last_failure = Some(signal);
                }
            }
        }

        let mut err = SantaError::no_feasible_assignment(policy.max_attempts, roster.len(), gifts);
        if let Some(signal) = last_failure {
            err = err
                .with_context("last_giver", signal.giver.as_str())
                .with_context("last_slot", signal.slot.to_string());
        }
        Err(err)
    }
}

/// Runs the restart loop with the default engine.
pub fn generate_until_success<R: Rng + ?Sized>(
    roster: &Roster,
    gifts: usize,
    constraints: &ConstraintGraph,
    rng: &mut R,
    policy: &RetryPolicy,
) -> Result<GenerationReport, SantaError> {
    AssignmentEngine::new().generate_until_success(roster, gifts, constraints, rng, policy)
}
