use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use santa_core::SantaError;
use santa_engine::{plan_rounds, run_exchange, write_json, ExchangeConfig, ExchangeReport};

#[derive(Args, Debug)]
pub struct DrawArgs {
    /// YAML or JSON exchange configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// The number of gifts each person should give and receive.
    #[arg(short = 'n', long = "num-gifts")]
    pub num_gifts: Option<usize>,
    /// Seed for a reproducible draw; a random one is chosen otherwise.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Attempts to make before giving up on the exclusions.
    #[arg(long = "max-attempts")]
    pub max_attempts: Option<usize>,
    /// Pair of people who must not be matched, written `A:B`. Repeatable.
    #[arg(long = "exclude", value_name = "A:B", value_parser = parse_pair)]
    pub exclude: Vec<(String, String)>,
    /// Number of consecutive exchanges to draw without repeating a pairing.
    #[arg(long, default_value_t = 1)]
    pub rounds: usize,
    /// Write the report here instead of printing it.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// The players. Input all names separated by spaces.
    pub players: Vec<String>,
}

pub fn run(args: &DrawArgs) -> Result<(), Box<dyn Error>> {
    let config = build_config(args)?;
    let reports = draw(&config, args.rounds)?;

    for report in &reports {
        let reruns = report.generation.infeasible_attempts;
        if reruns > 0 {
            eprintln!("round {}: reran {} times before finding a valid draw", report.round, reruns);
        }
    }

    match (&args.out, reports.as_slice()) {
        (Some(path), [single]) => write_json(path, single)?,
        (Some(path), many) => write_json(path, many)?,
        (None, [single]) => println!("{}", serde_json::to_string_pretty(single)?),
        (None, many) => println!("{}", serde_json::to_string_pretty(many)?),
    }
    Ok(())
}

fn draw(config: &ExchangeConfig, rounds: usize) -> Result<Vec<ExchangeReport>, SantaError> {
    if rounds == 1 {
        return run_exchange(config).map(|report| vec![report]);
    }
    plan_rounds(config, rounds)
}

fn build_config(args: &DrawArgs) -> Result<ExchangeConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => ExchangeConfig::load(path)?,
        None => {
            if args.players.is_empty() {
                return Err("pass the players as arguments or use --config".into());
            }
            let mut config = ExchangeConfig::new(args.players.iter().cloned());
            config.seed_policy.master_seed = rand::random();
            config
        }
    };
    if args.config.is_some() && !args.players.is_empty() {
        config.participants = args.players.clone();
    }
    if let Some(gifts) = args.num_gifts {
        config.gifts = gifts;
    }
    if let Some(seed) = args.seed {
        config.seed_policy.master_seed = seed;
    }
    if let Some(max_attempts) = args.max_attempts {
        config.retry.max_attempts = max_attempts;
    }
    config.exclusions.extend(args.exclude.iter().cloned());
    Ok(config)
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once(':') {
        Some((a, b)) if !a.trim().is_empty() && !b.trim().is_empty() => {
            Ok((a.trim().to_string(), b.trim().to_string()))
        }
        _ => Err(format!("expected `A:B`, got `{raw}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_pair;

    #[test]
    fn pairs_split_on_colon() {
        assert_eq!(
            parse_pair("Kate:Sandra"),
            Ok(("Kate".to_string(), "Sandra".to_string()))
        );
        assert_eq!(
            parse_pair(" Eric : Katharina "),
            Ok(("Eric".to_string(), "Katharina".to_string()))
        );
        assert!(parse_pair("Kate").is_err());
        assert!(parse_pair("Kate:").is_err());
    }
}
