//! Main simulation runner.
//!
//! Each run drives a real [`Engine`] through `advance` at large steps with an
//! [`Autopilot`] issuing player actions. No game rule is reimplemented here;
//! statistics are read from the ledger and the tick results.

use super::autopilot::Autopilot;
use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::achievements::unlock_percentage;
use crate::catalog::DefaultCatalog;
use crate::core::engine::Engine;
use crate::core::resource_state::ResourceState;
use crate::core::tick::TickEvent;
use chrono::{Days, NaiveDate};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Calendar day the simulated player starts on.
fn start_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);
    let base_seed = config.seed.unwrap_or_else(rand::random);

    for run_idx in 0..config.num_runs {
        let seed = base_seed.wrapping_add(run_idx as u64);
        let stats = simulate_single_run(config, seed);

        if config.verbosity >= 2 {
            println!(
                "Run {}/{} (seed={}) - EPS {:.1}, lifetime {:.0}, ascensions {}",
                run_idx + 1,
                config.num_runs,
                seed,
                stats.final_eps,
                stats.all_time_evidence,
                stats.ascensions
            );
        }
        all_runs.push(stats);
    }

    SimReport::from_runs(all_runs, config.strategy.build().name())
}

/// Simulate one run from a fresh ledger.
pub fn simulate_single_run(config: &SimConfig, seed: u64) -> RunStats {
    let mut engine = Engine::new(
        ResourceState::new(),
        Arc::new(DefaultCatalog),
        config.engine.clone(),
        ChaCha8Rng::seed_from_u64(seed),
    );
    let mut pilot = Autopilot::new(config.strategy, config.clicks_per_second);
    pilot.start_quests = config.start_quests;
    pilot.claim_bonus_targets = config.claim_bonus_targets;

    let mut stats = RunStats {
        seed,
        ..RunStats::default()
    };
    let step = config.step_seconds.max(0.001);
    let mut day_index = 0u64;
    engine.observe_day(start_day());

    while engine.state().clock < config.duration_seconds {
        let elapsed_days = (engine.state().clock / SECONDS_PER_DAY) as u64;
        if elapsed_days > day_index {
            day_index = elapsed_days;
            if let Some(day) = start_day().checked_add_days(Days::new(day_index)) {
                engine.observe_day(day);
            }
        }

        let summary = pilot.act(&mut engine, step);
        stats.purchases += summary.purchases + summary.tinfoil_purchases;
        stats.challenges_claimed += summary.challenges_claimed;

        let result = engine.advance(step);
        for event in &result.events {
            if let TickEvent::Ascended { tokens, .. } = event {
                stats.tokens_earned += tokens;
            }
        }

        if config.auto_ascend && engine.can_ascend() {
            if let Ok(report) = engine.ascend() {
                stats.ascensions += 1;
                stats.first_ascension_at.get_or_insert(engine.state().clock);
                info!(
                    "Seed {} ascended at {:.0}s for {} tokens",
                    seed,
                    engine.state().clock,
                    report.tokens_earned
                );
            }
        }
    }

    // Flush events raised by a final ascension.
    for event in engine.advance(0.0).events {
        if let TickEvent::Ascended { tokens, .. } = event {
            stats.tokens_earned += tokens;
        }
    }

    let rates = engine.rates();
    let state = engine.state();
    stats.simulated_seconds = state.clock;
    stats.final_evidence = state.evidence;
    stats.final_eps = rates.eps;
    stats.all_time_evidence = state.lifetime.all_time_evidence;
    stats.generators_owned = state.total_generators();
    stats.upgrades_owned = state.upgrades.len();
    stats.clicks = state.lifetime.clicks;
    stats.critical_hits = state.lifetime.critical_hits;
    stats.bursts = state.lifetime.bursts;
    stats.quests_succeeded = state.lifetime.quests_succeeded;
    stats.quests_failed = state.lifetime.quests_failed;
    stats.bonus_targets_claimed = state.lifetime.bonus_targets_claimed;
    stats.conspiracies_proven = state.conspiracies.len();
    stats.achievements = state.achievements.len();
    stats.achievement_percentage = unlock_percentage(state, &DefaultCatalog);
    stats
}
