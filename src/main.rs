//! Headless real-time driver.
//!
//! Loads (or creates) the save, credits offline progress, then advances the
//! engine on the real clock and autosaves periodically. An optional autopilot
//! plays in the meantime so the loop does something visible on its own.

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::Parser;
use conspiracy::catalog::DefaultCatalog;
use conspiracy::core::constants::{AUTOSAVE_INTERVAL_SECONDS, TICK_INTERVAL_MS};
use conspiracy::core::{Engine, EngineConfig, TickEvent};
use conspiracy::events::EventChange;
use conspiracy::simulator::{Autopilot, StrategyKind};
use conspiracy::utils::{LoadSource, SaveManager};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Parser)]
#[command(name = "conspiracy")]
#[command(about = "Run the conspiracy idle engine headless on the real clock")]
struct Args {
    /// Stop after this many seconds (runs until killed when omitted)
    #[arg(long)]
    duration: Option<u64>,

    /// Let an autopilot click and buy with this strategy
    #[arg(long, value_enum)]
    strategy: Option<StrategyKind>,

    /// Autopilot clicks per second
    #[arg(long, default_value_t = 5.0)]
    cps: f64,

    /// JSON file with engine tunable overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save file location (defaults to the platform data directory)
    #[arg(long)]
    save: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)
            .with_context(|| format!("reading engine config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let saves = match &args.save {
        Some(path) => SaveManager::with_path(path),
        None => SaveManager::new().context("locating save directory")?,
    };

    let (state, source) = saves.load_or_fresh();
    match source {
        LoadSource::Primary => info!("Loaded save from {}", saves.save_path().display()),
        LoadSource::Backup => info!("Recovered save from {}", saves.backup_path().display()),
        LoadSource::Fresh => info!("Starting a new ledger"),
    }

    let mut engine = Engine::new(
        state,
        Arc::new(DefaultCatalog),
        config,
        ChaCha8Rng::from_entropy(),
    );

    let offline = engine.apply_offline_progress(Utc::now().timestamp());
    if offline.evidence_earned > 0.0 {
        info!(
            "Welcome back: {:.0} evidence from {}s away{}",
            offline.evidence_earned,
            offline.elapsed_seconds,
            if offline.was_capped() { " (capped)" } else { "" }
        );
    }
    if engine.observe_day(Local::now().date_naive()) {
        info!("New daily challenges are available");
    }

    let mut pilot = args.strategy.map(|kind| Autopilot::new(kind, args.cps));
    let quit = spawn_quit_listener();
    info!("Type q and press Enter to save and quit");
    let started = Instant::now();
    let mut last_tick = Instant::now();
    let mut last_autosave = Instant::now();

    loop {
        if quit.load(Ordering::Relaxed) {
            break;
        }
        if let Some(limit) = args.duration {
            if started.elapsed() >= Duration::from_secs(limit) {
                break;
            }
        }

        let delta = last_tick.elapsed().as_secs_f64();
        last_tick = Instant::now();

        if let Some(pilot) = pilot.as_mut() {
            pilot.act(&mut engine, delta);
        }
        let result = engine.advance(delta);
        for event in &result.events {
            report_event(event);
        }

        if last_autosave.elapsed() >= Duration::from_secs(AUTOSAVE_INTERVAL_SECONDS) {
            if engine.observe_day(Local::now().date_naive()) {
                info!("New daily challenges are available");
            }
            save(&mut engine, &saves)?;
            info!(
                "Autosaved: {:.0} evidence, {:.1}/s",
                engine.state().evidence,
                engine.rates().eps
            );
            last_autosave = Instant::now();
        }

        thread::sleep(Duration::from_millis(TICK_INTERVAL_MS));
    }

    save(&mut engine, &saves)?;
    info!("Saved to {}", saves.save_path().display());
    Ok(())
}

/// Watch stdin for a quit line and raise the flag. Closed stdin is ignored
/// so a detached driver keeps running until its duration ends.
fn spawn_quit_listener() -> Arc<AtomicBool> {
    let quit = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&quit);
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(text) = line else { return };
            if is_quit_command(&text) {
                flag.store(true, Ordering::Relaxed);
                return;
            }
        }
    });
    quit
}

fn is_quit_command(line: &str) -> bool {
    matches!(line.trim(), "q" | "Q" | "quit")
}

fn save(engine: &mut Engine, saves: &SaveManager) -> Result<()> {
    engine.mark_saved(Utc::now().timestamp());
    saves
        .save(&engine.snapshot())
        .with_context(|| format!("writing save {}", saves.save_path().display()))
}

fn report_event(event: &TickEvent) {
    match event {
        TickEvent::ComboBurst { amount } => info!("Combo burst for {:.0} evidence", amount),
        TickEvent::Event(EventChange::BuffStarted { expires_at }) => {
            info!("Clicking frenzy until t={:.0}s", expires_at)
        }
        TickEvent::Event(EventChange::BonusTargetSpawned { .. }) => {
            info!("A bonus target appeared")
        }
        TickEvent::Event(_) => {}
        TickEvent::QuestResolved(outcome) if outcome.success => info!(
            "Quest {} succeeded: {:.0} evidence, {} tinfoil",
            outcome.quest_id, outcome.evidence, outcome.tinfoil
        ),
        TickEvent::QuestResolved(outcome) => info!(
            "Quest {} failed ({} believers lost)",
            outcome.quest_id, outcome.believers_lost
        ),
        TickEvent::AchievementUnlocked { id } => info!("Achievement unlocked: {}", id),
        TickEvent::ChallengeCompleted { id } => info!("Daily challenge completed: {}", id),
        TickEvent::Ascended {
            tokens,
            times_ascended,
        } => info!("Ascended (#{}) for {} tokens", times_ascended, tokens),
    }
}
