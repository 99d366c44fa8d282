//! Tarnish planner command line.
//!
//! Reads a batch in the line-oriented text format from a file or stdin,
//! plans the longest schedule within the wall-clock budget and prints the
//! two output lines to stdout.

use anyhow::Context;
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use tarnish_scheduler::{PlanTextHandler, PlannerConfig, SchedulePlanner};

#[derive(Parser, Debug)]
#[command(name = "tarnish", about = "Plan the longest corruption-free transaction schedule")]
struct Args {
    /// Input file with the batch text; stdin when omitted.
    input: Option<PathBuf>,

    /// Wall-clock budget for the run, in milliseconds.
    #[arg(long)]
    budget_ms: Option<u64>,

    /// Seed for sampled scoring and shuffled restarts; omit for an
    /// OS-drawn seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Candidate sample size per step on the cheapest scoring tier.
    #[arg(long)]
    sample_cap: Option<usize>,
}

fn build_config(args: &Args) -> PlannerConfig {
    let mut config = PlannerConfig::default();
    if let Some(budget_ms) = args.budget_ms {
        config.budget_ms = budget_ms;
        // Keep the downgrade boundaries inside the budget at their
        // default proportions.
        config.downgrade_approx_ms = budget_ms * 2 / 5;
        config.downgrade_sampled_ms = budget_ms * 3 / 4;
    }
    if args.seed.is_some() {
        config.rng_seed = args.seed;
    }
    if let Some(sample_cap) = args.sample_cap {
        config.sample_cap = sample_cap;
    }
    config
}

fn read_input(args: &Args) -> anyhow::Result<String> {
    match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading batch from {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading batch from stdin")?;
            Ok(buffer)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = build_config(&args);
    debug!(?config, "Planner configuration");

    let input = read_input(&args)?;
    let handler = PlanTextHandler::new(SchedulePlanner::with_config(config));

    let output = handler.handle(&input).await.context("planning failed")?;
    print!("{output}");

    Ok(())
}
