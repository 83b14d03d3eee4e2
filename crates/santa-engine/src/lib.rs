#![deny(missing_docs)]
#![doc = include_str!("../docs/engine-api.md")]

//! Constrained random gift assignment for Secret Santa style exchanges.

/// Assignment map and invariant checks.
pub mod assignment;
/// YAML/JSON exchange configuration, retry budget and deferral policy.
pub mod config;
/// Deterministic seed derivation per round.
pub mod determinism;
/// Single-attempt randomized greedy engine.
pub mod engine;
/// Configured exchanges and multi-round planning.
pub mod exchange;
/// Givee pool with deferral to the front.
pub mod pool;
/// JSON report and assignment file helpers.
pub mod report;
/// Restart loop around single attempts.
pub mod retry;

pub use assignment::Assignment;
pub use config::{DeferralLimit, ExchangeConfig, RetryPolicy, SeedPolicy};
pub use engine::{generate, AssignmentEngine, AttemptOutcome, InfeasibleSignal};
pub use exchange::{config_hash, plan_rounds, run_exchange, ExchangeReport};
pub use pool::GiveePool;
pub use report::{load_assignments, write_json};
pub use retry::{generate_until_success, GenerationReport};
