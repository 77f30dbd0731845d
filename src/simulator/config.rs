//! Simulation configuration.

use super::strategy::StrategyKind;
use crate::core::config::EngineConfig;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Simulated play time per run, in seconds
    pub duration_seconds: f64,

    /// Game seconds per advance call
    pub step_seconds: f64,

    pub strategy: StrategyKind,

    /// Simulated manual click rate
    pub clicks_per_second: f64,

    /// Start every quest the free believers allow
    pub start_quests: bool,

    /// Claim bonus targets as soon as they spawn
    pub claim_bonus_targets: bool,

    /// Ascend whenever eligible
    pub auto_ascend: bool,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,

    pub engine: EngineConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 10,
            seed: None,
            duration_seconds: 4.0 * 3600.0,
            step_seconds: 1.0,
            strategy: StrategyKind::default(),
            clicks_per_second: 5.0,
            start_quests: true,
            claim_bonus_targets: true,
            auto_ascend: false,
            verbosity: 1,
            engine: EngineConfig::default(),
        }
    }
}

impl SimConfig {
    /// Single seeded hour, for smoke checks.
    pub fn quick_check(seed: u64) -> Self {
        Self {
            num_runs: 1,
            seed: Some(seed),
            duration_seconds: 3600.0,
            verbosity: 0,
            ..Default::default()
        }
    }

    /// Long runs that ascend whenever possible
    pub fn prestige_loop(hours: f64) -> Self {
        Self {
            duration_seconds: hours * 3600.0,
            step_seconds: 5.0,
            auto_ascend: true,
            ..Default::default()
        }
    }

    /// Compare strategies on identical seeds
    pub fn strategy_comparison(strategy: StrategyKind, seed: u64) -> Self {
        Self {
            num_runs: 5,
            seed: Some(seed),
            strategy,
            verbosity: 0,
            ..Default::default()
        }
    }
}
