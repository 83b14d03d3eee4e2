use rand::Rng;
use santa_core::errors::SantaError;
use santa_core::{Participant, Roster};
use santa_graph::ConstraintGraph;
use serde::{Deserialize, Serialize};

use crate::assignment::Assignment;
use crate::config::DeferralLimit;
use crate::pool::GiveePool;

/// Describes where a single attempt ran out of usable candidates.
///
/// This is an expected outcome of the randomized draw. The caller starts a
/// fresh attempt instead of treating it as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfeasibleSignal {
    /// Giver whose slot could not be filled.
    pub giver: Participant,
    /// Zero-based gift slot of that giver.
    pub slot: usize,
    /// Consecutive deferrals spent on the slot before giving up.
    pub deferrals: usize,
    /// Candidates left in the pool when the attempt was abandoned.
    pub remaining: usize,
    /// Givers whose slots were all filled before this one.
    pub completed_givers: usize,
}

/// Result of a single generation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Every slot was filled.
    Assigned(Assignment),
    /// The attempt hit a dead end and was abandoned as a whole.
    Infeasible(InfeasibleSignal),
}

impl AttemptOutcome {
    /// Returns the assignment when the attempt succeeded.
    pub fn assignment(&self) -> Option<&Assignment> {
        match self {
            AttemptOutcome::Assigned(assignment) => Some(assignment),
            AttemptOutcome::Infeasible(_) => None,
        }
    }

    /// Consumes the outcome and returns the assignment when the attempt succeeded.
    pub fn into_assignment(self) -> Option<Assignment> {
        match self {
            AttemptOutcome::Assigned(assignment) => Some(assignment),
            AttemptOutcome::Infeasible(_) => None,
        }
    }
}

/// Randomized greedy gift assignment with deferral and whole-attempt restart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignmentEngine {
    deferral: DeferralLimit,
}

impl AssignmentEngine {
    /// Creates an engine using the default deferral limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with an explicit deferral limit.
    pub fn with_deferral_limit(deferral: DeferralLimit) -> Self {
        Self { deferral }
    }

    /// Returns the deferral limit used by each attempt.
    pub fn deferral_limit(&self) -> DeferralLimit {
        self.deferral
    }

    /// Runs exactly one attempt.
    ///
    /// Input validation happens before the RNG is touched, so a roster that
    /// is too small fails the same way for every seed. The returned
    /// assignment lists givers in roster order.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        roster: &Roster,
        gifts: usize,
        constraints: &ConstraintGraph,
        rng: &mut R,
    ) -> Result<AttemptOutcome, SantaError> {
        roster.check_capacity(gifts)?;

        let mut pool = GiveePool::new(roster, gifts);
        pool.shuffle(rng);

        let mut assignment = Assignment::with_capacity(roster.len());
        for (completed_givers, giver) in roster.iter().enumerate() {
            let mut givees: Vec<Participant> = Vec::with_capacity(gifts);
            for slot in 0..gifts {
                let mut deferrals = 0usize;
                let abandon = |deferrals: usize, remaining: usize| {
                    AttemptOutcome::Infeasible(InfeasibleSignal {
                        giver: giver.clone(),
                        slot,
                        deferrals,
                        remaining,
                        completed_givers,
                    })
                };
                let Some(mut candidate) = pool.draw() else {
                    return Ok(abandon(deferrals, 0));
                };
                while !acceptable(giver, candidate, &givees, constraints) {
                    if self.deferral.exceeded(deferrals, pool.len()) {
                        return Ok(abandon(deferrals, pool.len()));
                    }
                    pool.defer(candidate);
                    candidate = match pool.draw() {
                        Some(next) => next,
                        None => return Ok(abandon(deferrals, 0)),
                    };
                    deferrals += 1;
                }
                givees.push(candidate.clone());
            }
            assignment.insert(giver.clone(), givees);
        }

        debug_assert!(pool.is_empty(), "every pooled candidate is consumed");
        Ok(AttemptOutcome::Assigned(assignment))
    }
}

fn acceptable(
    giver: &Participant,
    candidate: &Participant,
    givees: &[Participant],
    constraints: &ConstraintGraph,
) -> bool {
    candidate != giver && !givees.contains(candidate) && !constraints.forbidden(giver, candidate)
}

/// Runs one attempt with the default engine.
pub fn generate<R: Rng + ?Sized>(
    roster: &Roster,
    gifts: usize,
    constraints: &ConstraintGraph,
    rng: &mut R,
) -> Result<AttemptOutcome, SantaError> {
    AssignmentEngine::new().generate(roster, gifts, constraints, rng)
}
