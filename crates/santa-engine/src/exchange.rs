use std::collections::BTreeMap;

use santa_core::errors::{ErrorInfo, SantaError};
use santa_core::provenance::{RunProvenance, SchemaVersion};
use santa_core::{RngHandle, Roster};
use santa_graph::{canonical_hash, ConstraintGraph};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::ExchangeConfig;
use crate::determinism::{plan_seed, round_seed};
use crate::engine::AssignmentEngine;
use crate::retry::GenerationReport;

/// Outcome of one configured exchange, with enough provenance to redo it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeReport {
    /// Schema version of this payload.
    pub schema_version: SchemaVersion,
    /// Zero-based round index.
    pub round: usize,
    /// Gifts per participant.
    pub gifts: usize,
    /// Assignment and retry diagnostics.
    #[serde(flatten)]
    pub generation: GenerationReport,
    /// Inputs and seed that produced the assignment.
    pub provenance: RunProvenance,
}

/// Validates the configuration and draws a single exchange.
pub fn run_exchange(config: &ExchangeConfig) -> Result<ExchangeReport, SantaError> {
    let roster = config.validate()?;
    let constraints = config.constraints();
    let config_hash = config_hash(config)?;
    let seed = round_seed(config.seed_policy.master_seed, 0);
    draw_round(config, &roster, &constraints, &config_hash, 0, seed)
}

/// Draws `rounds` consecutive exchanges in which nobody is matched with
/// anyone they were matched with in an earlier round.
///
/// Early rounds can leave a history that no later round fits into even when
/// another plan exists, so a later round running out of attempts redraws
/// the whole plan on a fresh seed, up to `retry.max_plan_restarts` times.
/// A plan that still fails returns `no-feasible-assignment` naming the
/// round that could not be drawn. A failing first round is never restarted.
pub fn plan_rounds(config: &ExchangeConfig, rounds: usize) -> Result<Vec<ExchangeReport>, SantaError> {
    if rounds == 0 {
        return Err(SantaError::Config(
            ErrorInfo::new("invalid-round-count", "at least one round must be planned")
                .with_context("rounds", "0"),
        ));
    }
    let roster = config.validate()?;
    let config_hash = config_hash(config)?;

    let mut restart = 0;
    loop {
        let master_seed = plan_seed(config.seed_policy.master_seed, rounds, restart);
        match draw_plan(config, &roster, &config_hash, master_seed, rounds) {
            Ok(reports) => return Ok(reports),
            Err(err) if restartable(&err) && restart < config.retry.max_plan_restarts => {
                restart += 1;
            }
            Err(err) if restartable(&err) => {
                return Err(err.with_context("plan_restarts", restart.to_string()));
            }
            Err(err) => return Err(err),
        }
    }
}

fn restartable(err: &SantaError) -> bool {
    err.is_no_feasible_assignment()
        && err
            .info()
            .context
            .get("round")
            .map(|round| round != "0")
            .unwrap_or(false)
}

fn draw_plan(
    config: &ExchangeConfig,
    roster: &Roster,
    config_hash: &str,
    master_seed: u64,
    rounds: usize,
) -> Result<Vec<ExchangeReport>, SantaError> {
    let mut constraints = config.constraints();
    let mut reports = Vec::with_capacity(rounds);
    for round in 0..rounds {
        let seed = round_seed(master_seed, round);
        let report = draw_round(config, roster, &constraints, config_hash, round, seed)?;
        constraints = constraints.with_assignment_history(report.generation.assignment.iter());
        reports.push(report);
    }
    Ok(reports)
}

fn draw_round(
    config: &ExchangeConfig,
    roster: &Roster,
    constraints: &ConstraintGraph,
    config_hash: &str,
    round: usize,
    seed: u64,
) -> Result<ExchangeReport, SantaError> {
    let mut rng = RngHandle::from_seed(seed);
    let engine = AssignmentEngine::with_deferral_limit(config.deferral);
    let generation = engine
        .generate_until_success(roster, config.gifts, constraints, &mut rng, &config.retry)
        .map_err(|err| err.with_context("round", round.to_string()))?;

    let mut tool_versions = BTreeMap::new();
    tool_versions.insert(
        env!("CARGO_PKG_NAME").to_string(),
        env!("CARGO_PKG_VERSION").to_string(),
    );
    Ok(ExchangeReport {
        schema_version: SchemaVersion::default(),
        round,
        gifts: config.gifts,
        generation,
        provenance: RunProvenance {
            config_hash: config_hash.to_string(),
            constraint_hash: canonical_hash(constraints),
            seed,
            seed_label: config.seed_policy.label.clone(),
            tool_versions,
        },
    })
}

/// Hashes the canonical JSON form of the configuration.
pub fn config_hash(config: &ExchangeConfig) -> Result<String, SantaError> {
    let bytes = serde_json::to_vec(config)
        .map_err(|err| SantaError::Serde(ErrorInfo::new("serialize-json", err.to_string())))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}
