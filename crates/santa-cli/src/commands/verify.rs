use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use santa_engine::{load_assignments, ExchangeConfig};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Exchange configuration the assignment was drawn from.
    #[arg(long)]
    pub config: PathBuf,
    /// Assignment JSON: a bare map, a draw report, or the report list of a
    /// multi-round draw.
    #[arg(long)]
    pub assignment: PathBuf,
}

#[derive(Debug, Serialize)]
struct VerifyReport {
    status: String,
    givers: usize,
    gifts: usize,
    rounds: usize,
}

pub fn run(args: &VerifyArgs) -> Result<(), Box<dyn Error>> {
    let config = ExchangeConfig::load(&args.config)?;
    let roster = config.validate()?;
    let assignments = load_assignments(&args.assignment)?;
    if assignments.is_empty() {
        return Err("assignment file holds no rounds".into());
    }

    // Later rounds must also avoid every pairing drawn before them.
    let mut constraints = config.constraints();
    for (round, assignment) in assignments.iter().enumerate() {
        assignment
            .validate(&roster, config.gifts, &constraints)
            .map_err(|err| err.with_context("round", round.to_string()))?;
        constraints = constraints.with_assignment_history(assignment.iter());
    }

    let report = VerifyReport {
        status: "ok".into(),
        givers: roster.len(),
        gifts: config.gifts,
        rounds: assignments.len(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
