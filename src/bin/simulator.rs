//! Conspiracy balance simulator.
//!
//! Runs accelerated playthroughs through the real engine and prints a
//! summary of economy growth, activity and prestige timing.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulator                          # 10 runs, 4 hours each
//!   cargo run --bin simulator -- --runs 50 --hours 12  # longer sweep
//!   cargo run --bin simulator -- --compare --seed 42   # every strategy, same seeds

use anyhow::{Context, Result};
use clap::Parser;
use conspiracy::core::EngineConfig;
use conspiracy::simulator::{run_simulation, SimConfig, SimReport, StrategyKind};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "simulator")]
#[command(about = "Headless balance simulator for the conspiracy engine")]
struct Args {
    /// Number of runs with incrementing seeds
    #[arg(short = 'n', long, default_value_t = 10)]
    runs: u32,

    /// Base RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated hours per run
    #[arg(long, default_value_t = 4.0)]
    hours: f64,

    /// Game seconds per advance step
    #[arg(long, default_value_t = 1.0)]
    step: f64,

    /// Purchase strategy
    #[arg(long, value_enum, default_value_t = StrategyKind::PaybackOptimal)]
    strategy: StrategyKind,

    /// Run every strategy and print one report each
    #[arg(long)]
    compare: bool,

    /// Simulated manual clicks per second
    #[arg(long, default_value_t = 5.0)]
    cps: f64,

    /// Ascend whenever eligible
    #[arg(long)]
    auto_ascend: bool,

    /// Never start quests
    #[arg(long)]
    no_quests: bool,

    /// JSON file with engine tunable overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the JSON report to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Print per-run lines
    #[arg(short, long)]
    verbose: bool,

    /// Only print the final report
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let engine = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)
            .with_context(|| format!("reading engine config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let base = SimConfig {
        num_runs: args.runs.max(1),
        seed: args.seed,
        duration_seconds: args.hours.max(0.0) * 3600.0,
        step_seconds: args.step,
        strategy: args.strategy,
        clicks_per_second: args.cps,
        start_quests: !args.no_quests,
        auto_ascend: args.auto_ascend,
        verbosity: if args.verbose { 2 } else { 1 },
        engine,
        ..SimConfig::default()
    };

    let strategies: Vec<StrategyKind> = if args.compare {
        StrategyKind::ALL.to_vec()
    } else {
        vec![args.strategy]
    };

    if !args.quiet {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              CONSPIRACY BALANCE SIMULATOR                     ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Runs:           {}", base.num_runs);
        println!("  Hours per run:  {:.1}", args.hours);
        println!("  Step:           {}s", base.step_seconds);
        println!("  Clicks/sec:     {}", base.clicks_per_second);
        println!("  Auto ascend:    {}", base.auto_ascend);
        if let Some(seed) = base.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
    }

    let mut reports: Vec<SimReport> = Vec::with_capacity(strategies.len());
    for strategy in strategies {
        let config = SimConfig {
            strategy,
            ..base.clone()
        };
        let report = run_simulation(&config);
        println!("{}", report.to_text());
        reports.push(report);
    }

    if let Some(path) = &args.json {
        let json = if reports.len() == 1 {
            reports[0].to_json()
        } else {
            serde_json::to_string_pretty(&reports)?
        };
        std::fs::write(path, json)
            .with_context(|| format!("writing JSON report {}", path.display()))?;
        println!("JSON report saved to: {}", path.display());
    }

    Ok(())
}
