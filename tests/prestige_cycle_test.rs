//! Integration test: complete prestige cycle
//!
//! Tests the full flow: fresh ledger → earn past the threshold → ascend →
//! verify what reset and what carried over.

use conspiracy::catalog::DefaultCatalog;
use conspiracy::core::{ActionError, Engine, EngineConfig, ResourceState, TickEvent};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

fn engine_with(state: ResourceState, config: EngineConfig) -> Engine {
    Engine::new(
        state,
        Arc::new(DefaultCatalog),
        config,
        ChaCha8Rng::seed_from_u64(5),
    )
}

fn ready_to_ascend() -> ResourceState {
    let mut state = ResourceState::new();
    state.evidence = 12_345.0;
    state.total_evidence_earned = 60_000.0;
    state.lifetime.all_time_evidence = 60_000.0;
    state.tinfoil = 9;
    state.generators.insert("blogger".to_string(), 25);
    state.generators.insert("podcaster".to_string(), 3);
    state.upgrades.insert("red_string".to_string());
    state.achievements.insert("first_click".to_string());
    state.achievements.insert("evidence_1k".to_string());
    state
}

#[test]
fn test_ascend_from_sixty_thousand() {
    let mut engine = engine_with(ready_to_ascend(), EngineConfig::default());
    let achievements_before = engine.state().achievements.clone();

    assert!(engine.can_ascend());
    assert_eq!(engine.tokens_earned(), 1);

    let report = engine.ascend().unwrap();

    assert_eq!(report.tokens_earned, 1);
    assert_eq!(report.times_ascended, 1);
    let state = engine.state();
    assert!(state.generators.is_empty());
    assert!(state.upgrades.is_empty());
    assert_eq!(state.tinfoil, 0);
    assert_eq!(state.total_evidence_earned, 0.0);
    assert_eq!(state.prestige.times_ascended, 1);
    assert_eq!(state.illuminati_tokens, 1);
    assert_eq!(state.achievements, achievements_before);
    assert_eq!(state.lifetime.all_time_evidence, 60_000.0);
    assert!(!engine.can_ascend());
}

#[test]
fn test_ascend_is_reported_once() {
    let mut engine = engine_with(ready_to_ascend(), EngineConfig::default());
    engine.ascend().unwrap();

    let events = engine.advance(0.0).events;
    let ascended: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, TickEvent::Ascended { .. }))
        .collect();
    assert_eq!(
        ascended,
        vec![&TickEvent::Ascended {
            tokens: 1,
            times_ascended: 1
        }]
    );
}

#[test]
fn test_below_threshold_is_rejected() {
    let mut state = ready_to_ascend();
    state.total_evidence_earned = 49_999.0;
    let mut engine = engine_with(state, EngineConfig::default());
    let before = engine.snapshot();

    assert_eq!(
        engine.ascend(),
        Err(ActionError::NotEligible("below prestige threshold"))
    );
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn test_threshold_is_configurable() {
    let config = EngineConfig {
        prestige_threshold: 100_000.0,
        ..EngineConfig::default()
    };
    let engine = engine_with(ready_to_ascend(), config);
    assert!(!engine.can_ascend());
}

#[test]
fn test_tokens_buy_permanent_upgrades() {
    let mut engine = engine_with(ready_to_ascend(), EngineConfig::default());
    engine.ascend().unwrap();

    assert!(matches!(
        engine.purchase_prestige_upgrade("secret_handshake"),
        Err(ActionError::Unaffordable(_))
    ));
    engine.purchase_prestige_upgrade("illuminati_seal").unwrap();

    assert_eq!(engine.state().illuminati_tokens, 0);
    assert!(engine.state().prestige.upgrades.contains("illuminati_seal"));
    assert_eq!(
        engine.purchase_prestige_upgrade("illuminati_seal"),
        Err(ActionError::AlreadyOwned("illuminati_seal".to_string()))
    );
}
