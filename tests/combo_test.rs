//! Integration test: combo meter through manual clicks.

use conspiracy::catalog::DefaultCatalog;
use conspiracy::combo::ComboPhase;
use conspiracy::core::{Engine, EngineConfig, ResourceState, TickEvent};
use conspiracy::events::ActiveBuff;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

#[test]
fn test_thirteenth_click_bursts_once() {
    let mut engine = Engine::seeded(1);

    let bursts: Vec<f64> = (0..13)
        .filter_map(|_| engine.click(true, 1.0).burst)
        .collect();

    assert_eq!(bursts.len(), 1);
    assert_eq!(engine.state().lifetime.bursts, 1);
    assert_eq!(engine.state().combo.meter, 0.0);
    assert_eq!(engine.state().combo.streak, 0);
    // 10 clicks worth of base click power.
    assert_eq!(bursts[0], 10.0);
}

#[test]
fn test_twelve_clicks_stay_below_burst() {
    let mut engine = Engine::seeded(1);
    for _ in 0..12 {
        assert!(engine.click(true, 1.0).burst.is_none());
    }
    assert!(engine.state().combo.meter < 1.0);
    assert_eq!(engine.state().combo.streak, 12);
}

#[test]
fn test_burst_is_reported_by_next_advance() {
    let mut engine = Engine::seeded(1);
    for _ in 0..13 {
        engine.click(true, 1.0);
    }

    let result = engine.advance(0.0);
    assert!(result
        .events
        .iter()
        .any(|e| matches!(e, TickEvent::ComboBurst { amount } if *amount == 10.0)));
    assert!(engine.advance(0.0).events.is_empty());
}

#[test]
fn test_idle_meter_decays_to_zero() {
    let mut engine = Engine::seeded(1);
    for _ in 0..5 {
        engine.click(true, 1.0);
    }
    assert!(engine.state().combo.meter > 0.0);

    engine.advance(60.0);

    assert_eq!(engine.state().combo.meter, 0.0);
    assert_eq!(engine.state().combo.phase(), ComboPhase::Idle);
}

#[test]
fn test_burst_during_buff_uses_burst_multiplier() {
    let mut state = ResourceState::new();
    state.events.buff = Some(ActiveBuff {
        started_at: 0.0,
        expires_at: 1000.0,
    });
    let config = EngineConfig::default();
    let mut engine = Engine::new(
        state,
        Arc::new(DefaultCatalog),
        config.clone(),
        ChaCha8Rng::seed_from_u64(1),
    );

    let bursts: Vec<f64> = (0..13)
        .filter_map(|_| engine.click(true, 1.0).burst)
        .collect();

    let click_power = engine.rates().click_power;
    let expected = click_power * config.combo.burst_clicks * config.events.buff_burst_multiplier;
    assert_eq!(bursts.len(), 1);
    assert_eq!(bursts[0], expected);
    assert_eq!(bursts[0], click_power * 10.0 * 10.0);
    assert_ne!(bursts[0], click_power * 10.0 * config.events.buff_click_multiplier);
}
